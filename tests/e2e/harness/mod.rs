//! E2E test harness for VSH.
//!
//! This module contains test infrastructure with builders and assertion
//! variants that not every scenario uses.

#![allow(dead_code)]

pub mod workspace;

// Re-export commonly used types
pub use assertions::{Assertion, StateMatch};
pub use scenario::Scenario;
