//! XML audit log of accepted commands.
//!
//! The document has the shape
//!
//! ```xml
//! <?xml version="1.0" encoding="utf-8"?>
//! <log>
//!   <entry>
//!     <user>alice</user>
//!     <action>cd docs</action>
//!   </entry>
//! </log>
//! ```
//!
//! Every append re-reads the file, adds one entry and rewrites the whole
//! document, so the file is well formed after each call.

use crate::atomic;
use crate::error::{Result, VshError};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One recorded action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEntry {
    pub user: String,
    pub action: String,
}

impl AuditEntry {
    pub fn new(user: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            action: action.into(),
        }
    }
}

/// Append-only audit trail stored as an XML file.
#[derive(Debug, Clone)]
pub struct AuditLog {
    path: PathBuf,
    username: String,
}

impl AuditLog {
    /// Creates an empty log at `path`, discarding any previous file.
    pub fn create(path: impl AsRef<Path>, username: impl Into<String>) -> Result<Self> {
        let log = Self {
            path: path.as_ref().to_path_buf(),
            username: username.into(),
        };
        log.write_entries(&[])?;
        Ok(log)
    }

    /// Appends one entry for the session user.
    pub fn append(&self, action: &str) -> Result<()> {
        let mut entries = self.entries()?;
        entries.push(AuditEntry::new(self.username.clone(), action));
        self.write_entries(&entries)?;
        debug!(action, total = entries.len(), "audit entry appended");
        Ok(())
    }

    /// Reads every entry currently in the file, in order.
    pub fn entries(&self) -> Result<Vec<AuditEntry>> {
        Self::read_entries(&self.path)
    }

    /// Reads the entries of the log file at `path` without attaching to it.
    pub fn read_entries(path: impl AsRef<Path>) -> Result<Vec<AuditEntry>> {
        let path = path.as_ref();
        let error = |reason: String| VshError::AuditLog {
            path: path.to_path_buf(),
            reason,
        };
        let content = fs::read_to_string(path).map_err(|e| error(e.to_string()))?;
        parse_entries(&content).map_err(error)
    }

    fn write_entries(&self, entries: &[AuditEntry]) -> Result<()> {
        let document = render(entries).map_err(|e| self.error(e))?;
        atomic::write(&self.path, &document).map_err(|e| self.error(e))
    }

    fn error(&self, e: impl std::fmt::Display) -> VshError {
        VshError::AuditLog {
            path: self.path.clone(),
            reason: e.to_string(),
        }
    }
}

#[derive(Clone, Copy)]
enum Field {
    User,
    Action,
}

fn parse_entries(content: &str) -> std::result::Result<Vec<AuditEntry>, String> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut entries = Vec::new();
    let mut current: Option<AuditEntry> = None;
    let mut field: Option<Field> = None;
    let mut saw_root = false;

    loop {
        match reader.read_event().map_err(|e| e.to_string())? {
            Event::Start(e) => match e.name().as_ref() {
                b"log" => saw_root = true,
                b"entry" => current = Some(AuditEntry::new("", "")),
                b"user" => field = Some(Field::User),
                b"action" => field = Some(Field::Action),
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"log" => saw_root = true,
                b"entry" => entries.push(AuditEntry::new("", "")),
                _ => {}
            },
            Event::Text(t) => {
                if let (Some(entry), Some(field)) = (current.as_mut(), field) {
                    let text = t.unescape().map_err(|e| e.to_string())?;
                    match field {
                        Field::User => entry.user.push_str(&text),
                        Field::Action => entry.action.push_str(&text),
                    }
                }
            }
            Event::End(e) => match e.name().as_ref() {
                b"entry" => {
                    if let Some(entry) = current.take() {
                        entries.push(entry);
                    }
                }
                b"user" | b"action" => field = None,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    if !saw_root {
        return Err("missing <log> root element".to_string());
    }
    Ok(entries)
}

fn reason(e: impl std::fmt::Display) -> String {
    e.to_string()
}

fn render(entries: &[AuditEntry]) -> std::result::Result<Vec<u8>, String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
        .map_err(reason)?;
    if entries.is_empty() {
        writer
            .write_event(Event::Empty(BytesStart::new("log")))
            .map_err(reason)?;
    } else {
        writer
            .write_event(Event::Start(BytesStart::new("log")))
            .map_err(reason)?;
        for entry in entries {
            writer
                .write_event(Event::Start(BytesStart::new("entry")))
                .map_err(reason)?;
            for (tag, text) in [("user", &entry.user), ("action", &entry.action)] {
                writer
                    .write_event(Event::Start(BytesStart::new(tag)))
                    .map_err(reason)?;
                writer
                    .write_event(Event::Text(BytesText::new(text)))
                    .map_err(reason)?;
                writer
                    .write_event(Event::End(BytesEnd::new(tag)))
                    .map_err(reason)?;
            }
            writer
                .write_event(Event::End(BytesEnd::new("entry")))
                .map_err(reason)?;
        }
        writer
            .write_event(Event::End(BytesEnd::new("log")))
            .map_err(reason)?;
    }

    let mut document = writer.into_inner();
    document.push(b'\n');
    Ok(document)
}
