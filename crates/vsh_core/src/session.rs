//! Session lifecycle: extraction, command execution, shutdown.

use crate::archive::ArchiveStore;
use crate::audit::AuditLog;
use crate::command::Command;
use crate::config::Config;
use crate::error::Result;
use crate::handlers;
use crate::navigator::Navigator;
use crate::shell::Prompt;
use std::io::Write;
use std::path::Path;
use tracing::{info, warn};

/// Lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Accepting commands.
    Running,
    /// `exit` or an interrupt was received; no further commands run.
    Terminated,
}

/// One interactive session over an extracted archive.
///
/// Owns everything a command handler may touch: the working tree (through
/// the archive store), the navigation state and the audit log.
pub struct Session {
    username: String,
    archive: ArchiveStore,
    audit: AuditLog,
    navigator: Navigator,
    state: SessionState,
}

impl Session {
    /// Materializes the working tree and starts an empty audit log.
    ///
    /// # Errors
    ///
    /// Returns `ArchiveOpen` if the archive cannot be unpacked and
    /// `AuditLog` if the log file cannot be created.
    pub fn start(config: &Config) -> Result<Self> {
        let archive = ArchiveStore::new(&config.fs_path, &config.work_dir);
        archive.extract()?;

        let audit = AuditLog::create(&config.log_path, config.username.clone())?;
        let navigator = Navigator::new(archive.work_root());

        info!(user = %config.username, "session started");
        Ok(Self {
            username: config.username.clone(),
            archive,
            audit,
            navigator,
            state: SessionState::Running,
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Current virtual directory.
    pub fn cwd(&self) -> String {
        self.navigator.cwd()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn audit(&self) -> &AuditLog {
        &self.audit
    }

    /// Host directory holding the working tree.
    pub fn work_root(&self) -> &Path {
        self.archive.work_root()
    }

    /// Prompt for the next line of input.
    pub fn prompt(&self) -> Prompt {
        Prompt {
            username: self.username.clone(),
            cwd: self.cwd(),
        }
    }

    /// Runs one command, writing its outcome to `out`.
    ///
    /// Command-level failures are reported as text and never returned;
    /// only a failure to write to `out` is an error. Accepted commands are
    /// appended to the audit log.
    pub fn execute(&mut self, command: &Command, out: &mut dyn Write) -> Result<()> {
        if self.state == SessionState::Terminated {
            return Ok(());
        }

        let accepted = match command {
            Command::Exit => {
                self.state = SessionState::Terminated;
                true
            }
            Command::Ls => handlers::ls(&self.navigator, out)?,
            Command::Cd(arg) => handlers::cd(&mut self.navigator, arg.as_deref(), out)?,
            Command::Touch(arg) => handlers::touch(&self.navigator, arg.as_deref(), out)?,
            Command::Rmdir(arg) => handlers::rmdir(&self.navigator, arg.as_deref(), out)?,
            Command::Rev(arg) => handlers::rev(&self.navigator, arg.as_deref(), out)?,
            Command::Unknown(_) => {
                writeln!(out, "Command not found.")?;
                false
            }
        };

        if accepted {
            if let Some(action) = command.audit_action() {
                self.record(&action, out)?;
            }
        }
        Ok(())
    }

    /// Handles an external interrupt the same way as `exit`.
    pub fn interrupt(&mut self, out: &mut dyn Write) -> Result<()> {
        if self.state == SessionState::Terminated {
            return Ok(());
        }
        writeln!(out)?;
        writeln!(out, "Exiting...")?;
        self.state = SessionState::Terminated;
        self.record("exit", out)
    }

    /// Packs the working tree back into the archive.
    ///
    /// Returns the number of archive entries written.
    pub fn close(self) -> Result<usize> {
        let count = self.archive.pack()?;
        info!(user = %self.username, entries = count, "session closed");
        Ok(count)
    }

    fn record(&self, action: &str, out: &mut dyn Write) -> Result<()> {
        if let Err(e) = self.audit.append(action) {
            warn!("Failed to append audit entry {:?}: {}", action, e);
            writeln!(out, "Warning: {}", e)?;
        }
        Ok(())
    }
}
