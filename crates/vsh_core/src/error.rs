//! Error types for vsh_core operations.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for vsh_core operations.
#[derive(Error, Debug)]
pub enum VshError {
    /// Configuration file does not exist.
    #[error("config file '{}' not found", .0.display())]
    ConfigNotFound(PathBuf),

    /// Configuration file has no data row.
    #[error("config file is empty or invalid")]
    ConfigEmpty,

    /// A required configuration key is missing or blank.
    #[error("missing required field in config file: {0}")]
    ConfigMissingField(&'static str),

    /// Configuration file could not be parsed.
    #[error("failed to parse config: {0}")]
    ConfigParse(String),

    /// The archive could not be opened or unpacked.
    #[error("cannot open archive {}: {}", path.display(), reason)]
    ArchiveOpen {
        /// Path to the archive
        path: PathBuf,
        /// Description of the failure
        reason: String,
    },

    /// The working tree could not be written back into the archive.
    #[error("cannot write archive {}: {}", path.display(), reason)]
    ArchiveWrite {
        /// Path to the archive
        path: PathBuf,
        /// Description of the failure
        reason: String,
    },

    /// The audit log could not be read, parsed or written.
    #[error("audit log error at {}: {}", path.display(), reason)]
    AuditLog {
        /// Path to the log file
        path: PathBuf,
        /// Description of the failure
        reason: String,
    },

    /// Target of a navigation is absent or not a directory.
    #[error("directory not found: {0}")]
    DirectoryNotFound(String),

    /// Argument is not a plain relative name inside the working tree.
    #[error("invalid name: {0:?}")]
    InvalidName(String),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl VshError {
    /// Returns a user-friendly recovery suggestion for the error, if available.
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            Self::ConfigNotFound(_) => {
                Some("Create the file or point to it with '--config <path>'.")
            }
            Self::ConfigEmpty | Self::ConfigMissingField(_) => {
                Some("Expected a header 'username,fs_path,log_path' followed by one data row.")
            }
            Self::ArchiveOpen { .. } => Some("Check that fs_path points to a gzip-compressed tar archive."),
            Self::ArchiveWrite { .. } => {
                Some("The working tree is left in place; fix permissions and pack it manually.")
            }
            _ => None,
        }
    }
}

/// Convenience Result type for vsh_core operations.
pub type Result<T> = std::result::Result<T, VshError>;
