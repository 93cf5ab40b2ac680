//! Session configuration loaded from a CSV or TOML file.

use crate::error::{Result, VshError};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Username recorded when the configuration does not name one.
pub const DEFAULT_USERNAME: &str = "unknown_user";

/// Default working-tree root, relative to the process working directory.
pub const DEFAULT_WORK_DIR: &str = "virtual_fs";

/// Resolved values needed to start a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Name shown in the prompt and recorded in every audit entry.
    pub username: String,

    /// Gzip-compressed tar archive holding the virtual filesystem.
    pub fs_path: PathBuf,

    /// XML audit log, recreated at every start.
    pub log_path: PathBuf,

    /// Directory the archive is extracted into.
    pub work_dir: PathBuf,
}

/// Raw row as found in the file. Every column is optional here;
/// requirements are enforced in [`Config::from_record`].
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigRecord {
    username: Option<String>,
    fs_path: Option<String>,
    log_path: Option<String>,
    work_dir: Option<String>,
}

impl Config {
    /// Load configuration from a file.
    ///
    /// Files ending in `.toml` are read as a flat TOML table, everything else
    /// as CSV with a header row; only the first data row is used.
    ///
    /// # Errors
    ///
    /// Returns `ConfigNotFound` if the file is absent, `ConfigEmpty` if it
    /// has no data row, `ConfigMissingField` if `fs_path` or `log_path` is
    /// absent or blank, and `ConfigParse` for malformed content.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(VshError::ConfigNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)
            .map_err(|e| VshError::ConfigParse(format!("failed to read config: {}", e)))?;

        let record = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => parse_toml(&content)?,
            _ => parse_csv(&content)?,
        };
        Self::from_record(record)
    }

    fn from_record(record: ConfigRecord) -> Result<Self> {
        let username = non_blank(record.username).unwrap_or_else(|| DEFAULT_USERNAME.to_string());
        let fs_path = non_blank(record.fs_path).ok_or(VshError::ConfigMissingField("fs_path"))?;
        let log_path =
            non_blank(record.log_path).ok_or(VshError::ConfigMissingField("log_path"))?;
        let work_dir = non_blank(record.work_dir).unwrap_or_else(|| DEFAULT_WORK_DIR.to_string());

        Ok(Self {
            username,
            fs_path: PathBuf::from(fs_path),
            log_path: PathBuf::from(log_path),
            work_dir: PathBuf::from(work_dir),
        })
    }
}

fn parse_csv(content: &str) -> Result<ConfigRecord> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    match reader.deserialize::<ConfigRecord>().next() {
        Some(record) => record.map_err(|e| VshError::ConfigParse(e.to_string())),
        None => Err(VshError::ConfigEmpty),
    }
}

fn parse_toml(content: &str) -> Result<ConfigRecord> {
    if content.trim().is_empty() {
        return Err(VshError::ConfigEmpty);
    }
    toml::from_str(content).map_err(|e| VshError::ConfigParse(e.to_string()))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
