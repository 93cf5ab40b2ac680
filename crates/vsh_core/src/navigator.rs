//! Navigation state: the current virtual directory and its mapping onto the
//! working tree.

use crate::error::{Result, VshError};
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Tracks the current virtual directory of a session.
///
/// The virtual path is kept as a list of plain name segments below the
/// working-tree root, so it can never contain `..`, a root component or an
/// empty name. Rendering joins them with `/` under a leading `/`.
#[derive(Debug, Clone)]
pub struct Navigator {
    root: PathBuf,
    segments: Vec<String>,
}

impl Navigator {
    /// Creates a navigator positioned at `/` of the tree rooted at `root`.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            segments: Vec::new(),
        }
    }

    /// Current virtual directory, e.g. `/` or `/docs/api`.
    pub fn cwd(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }

    /// Host path of the current virtual directory.
    pub fn resolve(&self) -> PathBuf {
        let mut path = self.root.clone();
        path.extend(&self.segments);
        path
    }

    /// Host path of `name` relative to the current virtual directory.
    ///
    /// The path may name an entry that does not exist yet, but none of its
    /// existing components may be a symlink.
    ///
    /// # Errors
    ///
    /// Returns `InvalidName` unless `name` is a relative path made only of
    /// plain names (no `/` prefix, `.` or `..`), or if it passes through a
    /// symlink.
    pub fn resolve_entry(&self, name: &str) -> Result<PathBuf> {
        let parts = plain_segments(name)?;
        self.join_without_links(&parts)
            .ok_or_else(|| VshError::InvalidName(name.to_string()))
    }

    /// Changes the current virtual directory.
    ///
    /// `..` moves to the parent and is a no-op at `/`. Any other target must
    /// name an existing directory below the current one; otherwise the state
    /// is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryNotFound` if the target is absent, is not a
    /// directory, is not a plain relative path, or passes through a symlink.
    pub fn cd(&mut self, target: &str) -> Result<()> {
        if target == ".." {
            self.segments.pop();
            debug!(cwd = %self.cwd(), "moved to parent");
            return Ok(());
        }

        let not_found = || VshError::DirectoryNotFound(target.to_string());
        let parts = plain_segments(target).map_err(|_| not_found())?;
        let candidate = self.join_without_links(&parts).ok_or_else(not_found)?;

        let is_dir = fs::symlink_metadata(&candidate)
            .map(|meta| meta.is_dir())
            .unwrap_or(false);
        if !is_dir {
            return Err(not_found());
        }

        self.segments.extend(parts);
        debug!(cwd = %self.cwd(), "changed directory");
        Ok(())
    }

    /// Appends `parts` to the current directory. Returns `None` if any
    /// existing component is a symlink.
    fn join_without_links(&self, parts: &[String]) -> Option<PathBuf> {
        let mut path = self.resolve();
        let mut exists = true;
        for part in parts {
            path.push(part);
            if !exists {
                continue;
            }
            match fs::symlink_metadata(&path) {
                Ok(meta) if meta.file_type().is_symlink() => {
                    debug!(path = %path.display(), "refusing to follow symlink");
                    return None;
                }
                Ok(_) => {}
                // nothing below a missing component can exist either
                Err(_) => exists = false,
            }
        }
        Some(path)
    }
}

/// Splits `name` into plain path segments.
fn plain_segments(name: &str) -> Result<Vec<String>> {
    let mut parts = Vec::new();
    for component in Path::new(name).components() {
        match component {
            Component::Normal(part) => match part.to_str() {
                Some(part) => parts.push(part.to_string()),
                None => return Err(VshError::InvalidName(name.to_string())),
            },
            _ => return Err(VshError::InvalidName(name.to_string())),
        }
    }
    if parts.is_empty() {
        return Err(VshError::InvalidName(name.to_string()));
    }
    Ok(parts)
}
