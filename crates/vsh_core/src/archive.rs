//! Archive store: materializes the working tree from a `.tar.gz` archive and
//! serializes it back on shutdown.

use crate::atomic;
use crate::error::{Result, VshError};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tar::{Archive, Builder};
use tracing::{debug, info};

/// Owns the pairing between an archive file and the directory it is
/// extracted into.
///
/// The working tree is a plain directory on disk; every virtual path of the
/// session maps to a path under `work_root`.
#[derive(Debug, Clone)]
pub struct ArchiveStore {
    archive_path: PathBuf,
    work_root: PathBuf,
}

impl ArchiveStore {
    /// Creates a store for `archive_path`, extracted into `work_root`.
    pub fn new(archive_path: impl AsRef<Path>, work_root: impl AsRef<Path>) -> Self {
        Self {
            archive_path: archive_path.as_ref().to_path_buf(),
            work_root: work_root.as_ref().to_path_buf(),
        }
    }

    /// Root directory of the working tree.
    pub fn work_root(&self) -> &Path {
        &self.work_root
    }

    /// Replaces the working tree with the archive's contents.
    ///
    /// Any existing tree at `work_root` is removed first. Entries whose path
    /// would land outside the root are skipped.
    ///
    /// Returns the number of entries unpacked.
    ///
    /// # Errors
    ///
    /// Returns `ArchiveOpen` if the archive is missing, not gzip, or not tar.
    pub fn extract(&self) -> Result<usize> {
        if self.work_root.exists() {
            debug!(root = %self.work_root.display(), "removing previous working tree");
            fs::remove_dir_all(&self.work_root)?;
        }
        fs::create_dir_all(&self.work_root)?;

        let count = self.unpack().map_err(|e| VshError::ArchiveOpen {
            path: self.archive_path.clone(),
            reason: e.to_string(),
        })?;

        info!(
            archive = %self.archive_path.display(),
            entries = count,
            "extracted archive"
        );
        Ok(count)
    }

    /// Writes the whole working tree into the archive, replacing it.
    ///
    /// Directories get their own entries so empty ones survive a round trip.
    /// Paths are stored relative to the root and symlinks are stored as
    /// links. The archive is written to a sibling temp file and renamed into
    /// place once complete.
    ///
    /// Returns the number of entries written.
    ///
    /// # Errors
    ///
    /// Returns `ArchiveWrite` if the tree cannot be read or the archive
    /// cannot be written.
    pub fn pack(&self) -> Result<usize> {
        let tmp_path = atomic::temp_path(&self.archive_path);

        let written = self
            .write_archive(&tmp_path)
            .and_then(|(file, count)| {
                atomic::commit(file, &tmp_path, &self.archive_path)?;
                Ok(count)
            });

        match written {
            Ok(count) => {
                info!(
                    archive = %self.archive_path.display(),
                    entries = count,
                    "packed working tree"
                );
                Ok(count)
            }
            Err(e) => {
                let _ = fs::remove_file(&tmp_path);
                Err(VshError::ArchiveWrite {
                    path: self.archive_path.clone(),
                    reason: e.to_string(),
                })
            }
        }
    }

    fn unpack(&self) -> io::Result<usize> {
        let file = File::open(&self.archive_path)?;
        let mut archive = Archive::new(GzDecoder::new(file));

        let mut count = 0;
        for entry in archive.entries()? {
            let mut entry = entry?;
            if entry.unpack_in(&self.work_root)? {
                count += 1;
            } else {
                debug!(path = ?entry.path().ok(), "skipped entry outside working tree");
            }
        }
        Ok(count)
    }

    fn write_archive(&self, tmp_path: &Path) -> io::Result<(File, usize)> {
        let file = File::create(tmp_path)?;
        let mut builder = Builder::new(GzEncoder::new(file, Compression::default()));
        builder.follow_symlinks(false);

        let count = append_tree(&mut builder, &self.work_root, Path::new(""))?;

        let file = builder.into_inner()?.finish()?;
        Ok((file, count))
    }
}

/// Appends every entry under `dir` in name order, recursing into
/// subdirectories. `prefix` is the archive path of `dir`.
fn append_tree<W: Write>(builder: &mut Builder<W>, dir: &Path, prefix: &Path) -> io::Result<usize> {
    let mut children = fs::read_dir(dir)?.collect::<io::Result<Vec<_>>>()?;
    children.sort_by_key(|entry| entry.file_name());

    let mut count = 0;
    for child in children {
        let host_path = child.path();
        let name = prefix.join(child.file_name());

        if child.file_type()?.is_dir() {
            builder.append_dir(&name, &host_path)?;
            count += 1 + append_tree(builder, &host_path, &name)?;
        } else {
            builder.append_path_with_name(&host_path, &name)?;
            count += 1;
        }
    }
    Ok(count)
}
