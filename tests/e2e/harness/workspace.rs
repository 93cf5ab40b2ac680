use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::collections::{BTreeMap, BTreeSet};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tar::{Archive, Builder, EntryType, Header};
use tempfile::TempDir;
use vsh_core::Config;

/// Archive contents as seen by tar: regular files, directories and symlinks
/// (path to link target), paths relative to the archive root without
/// trailing slashes.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ArchiveListing {
    pub files: BTreeMap<String, Vec<u8>>,
    pub dirs: BTreeSet<String>,
    pub links: BTreeMap<String, String>,
}

/// Manages isolated test environments with tempfile
pub struct TestWorkspace {
    dir: TempDir,
}

impl TestWorkspace {
    /// Create an empty workspace
    pub fn empty() -> Result<Self> {
        let dir = TempDir::new().context("Failed to create temp directory")?;
        Ok(Self { dir })
    }

    /// Create a workspace whose archive holds the given tree.
    ///
    /// The archive is written with `tar` directly, not through vsh_core, so
    /// round-trip checks compare against an independent encoder.
    pub fn with_tree(listing: &ArchiveListing) -> Result<Self> {
        let workspace = Self::empty()?;
        workspace.write_archive(listing)?;
        Ok(workspace)
    }

    /// Get workspace path
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn archive_path(&self) -> PathBuf {
        self.path().join("fs.tar.gz")
    }

    pub fn log_path(&self) -> PathBuf {
        self.path().join("log.xml")
    }

    pub fn work_dir(&self) -> PathBuf {
        self.path().join("virtual_fs")
    }

    /// Session configuration pointing at this workspace.
    pub fn config(&self, username: &str) -> Config {
        Config {
            username: username.to_string(),
            fs_path: self.archive_path(),
            log_path: self.log_path(),
            work_dir: self.work_dir(),
        }
    }

    /// Write a gzip tar archive with explicit entries for every directory.
    pub fn write_archive(&self, listing: &ArchiveListing) -> Result<()> {
        let file = File::create(self.archive_path()).context("Failed to create archive")?;
        let mut builder = Builder::new(GzEncoder::new(file, Compression::default()));

        for dir in &listing.dirs {
            let mut header = Header::new_gnu();
            header.set_entry_type(EntryType::Directory);
            header.set_mode(0o755);
            header.set_size(0);
            builder.append_data(&mut header, format!("{}/", dir), std::io::empty())?;
        }
        for (path, content) in &listing.files {
            let mut header = Header::new_gnu();
            header.set_entry_type(EntryType::Regular);
            header.set_mode(0o644);
            header.set_size(content.len() as u64);
            builder.append_data(&mut header, path, content.as_slice())?;
        }
        for (path, target) in &listing.links {
            let mut header = Header::new_gnu();
            header.set_entry_type(EntryType::Symlink);
            header.set_mode(0o777);
            header.set_size(0);
            header.set_link_name(target)?;
            builder.append_data(&mut header, path, std::io::empty())?;
        }

        builder.into_inner()?.finish()?;
        Ok(())
    }

    /// Read back what the archive currently holds.
    pub fn read_archive(&self) -> Result<ArchiveListing> {
        let file = File::open(self.archive_path()).context("Failed to open archive")?;
        let mut archive = Archive::new(GzDecoder::new(file));
        let mut listing = ArchiveListing::default();

        for entry in archive.entries()? {
            let mut entry = entry?;
            let path = entry
                .path()?
                .to_string_lossy()
                .trim_start_matches("./")
                .trim_end_matches('/')
                .to_string();
            if path.is_empty() {
                continue;
            }
            let entry_type = entry.header().entry_type();
            if entry_type.is_dir() {
                listing.dirs.insert(path);
            } else if entry_type.is_symlink() {
                let target = entry
                    .link_name()?
                    .map(|target| target.to_string_lossy().into_owned())
                    .unwrap_or_default();
                listing.links.insert(path, target);
            } else {
                let mut content = Vec::new();
                std::io::Read::read_to_end(&mut entry, &mut content)?;
                listing.files.insert(path, content);
            }
        }
        Ok(listing)
    }

    /// Place files and directories next to the working tree, outside of it.
    ///
    /// Archive symlinks reach them with targets like `../secret.txt`.
    pub fn write_outside(&self, listing: &ArchiveListing) -> Result<()> {
        for dir in &listing.dirs {
            fs::create_dir_all(self.path().join(dir))?;
        }
        for (path, content) in &listing.files {
            let host = self.path().join(path);
            if let Some(parent) = host.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(host, content).context("Failed to write outside file")?;
        }
        Ok(())
    }

    /// Path of an entry outside the working tree
    pub fn outside_path(&self, path: &str) -> PathBuf {
        self.path().join(path)
    }

    /// Write raw bytes over the archive file
    pub fn corrupt_archive(&self, bytes: &[u8]) -> Result<()> {
        fs::write(self.archive_path(), bytes).context("Failed to overwrite archive")
    }

    /// Check whether a path exists in the extracted working tree
    pub fn tree_has(&self, path: &str) -> bool {
        self.work_dir().join(path).exists()
    }
}
