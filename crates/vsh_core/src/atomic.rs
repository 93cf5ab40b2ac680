//! Temp file + rename helpers shared by the archive and audit writers.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Returns the sibling temp path used while `path` is being rewritten.
pub(crate) fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("vsh"));
    name.push(".tmp");
    path.with_file_name(name)
}

/// Syncs `file`, then moves `tmp_path` over `path`.
pub(crate) fn commit(file: File, tmp_path: &Path, path: &Path) -> std::io::Result<()> {
    file.sync_all()?;
    drop(file);

    fs::rename(tmp_path, path)?;

    // fsync parent directory (Unix-specific for crash safety)
    #[cfg(unix)]
    {
        if let Some(parent) = path.parent() {
            if let Ok(dir_file) = File::open(parent) {
                let _ = dir_file.sync_all();
            }
        }
    }

    Ok(())
}

/// Replaces the content of `path` with `bytes` atomically.
pub(crate) fn write(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let tmp_path = temp_path(path);
    let mut file = File::create(&tmp_path)?;
    if let Err(e) = file.write_all(bytes) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }
    commit(file, &tmp_path, path)
}
