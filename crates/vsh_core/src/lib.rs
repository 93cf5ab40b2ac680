//! VSH Core Library
//!
//! An interactive shell confined to a virtual filesystem, providing:
//! - A working tree materialized from a `.tar.gz` archive and packed back on exit
//! - Sandboxed navigation (`cd`) and file commands (`ls`, `touch`, `rmdir`, `rev`)
//! - An XML audit log of every accepted command
//!
//! # Quick Start
//!
//! ```no_run
//! use vsh_core::{shell, Config, ScriptedInput, Session};
//!
//! let config = Config::load("config.csv")?;
//! let mut session = Session::start(&config)?;
//!
//! let mut input = ScriptedInput::lines(["ls", "touch notes.txt", "exit"]);
//! shell::run(&mut session, &mut input, &mut std::io::stdout())?;
//!
//! session.close()?;
//! # Ok::<(), vsh_core::VshError>(())
//! ```
//!
//! # Command parsing
//!
//! ```
//! use vsh_core::Command;
//!
//! assert_eq!(Command::parse("cd docs"), Command::Cd(Some("docs".to_string())));
//! assert_eq!(Command::parse("EXIT"), Command::Exit);
//! assert_eq!(Command::parse("cd"), Command::Cd(None));
//! ```

mod archive;
mod atomic;
mod audit;
mod command;
mod config;
mod error;
mod handlers;
mod navigator;
mod session;
pub mod shell;

pub use archive::ArchiveStore;
pub use audit::{AuditEntry, AuditLog};
pub use command::Command;
pub use config::{Config, DEFAULT_USERNAME, DEFAULT_WORK_DIR};
pub use error::{Result, VshError};
pub use navigator::Navigator;
pub use session::{Session, SessionState};
pub use shell::{InputEvent, LineSource, Prompt, ScriptedInput};
