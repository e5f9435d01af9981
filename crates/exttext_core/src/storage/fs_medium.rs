//! Directory-rooted filesystem medium.
//!
//! # Invariants
//! - Files live directly under `root`; names are never joined as nested paths.
//! - Handles are scoped to a single call and closed on drop.

use super::medium::{MediumState, StorageMedium};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Storage medium backed by a real directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsStorageMedium {
    root: PathBuf,
}

impl FsStorageMedium {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

impl StorageMedium for FsStorageMedium {
    fn state(&self) -> MediumState {
        match fs::metadata(&self.root) {
            Err(_) => MediumState::Unmounted,
            Ok(meta) if !meta.is_dir() => MediumState::Removed,
            Ok(meta) if meta.permissions().readonly() => MediumState::MountedReadOnly,
            Ok(_) => MediumState::Mounted,
        }
    }

    fn append(&self, name: &str, bytes: &[u8]) -> io::Result<()> {
        fs::create_dir_all(&self.root)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.file_path(name))?;
        file.write_all(bytes)?;
        file.flush()
    }

    fn truncate(&self, name: &str) -> io::Result<()> {
        fs::create_dir_all(&self.root)?;
        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(self.file_path(name))?;
        file.write_all(b"")?;
        file.flush()
    }

    fn read(&self, name: &str) -> io::Result<Vec<u8>> {
        fs::read(self.file_path(name))
    }

    fn describe(&self, name: &str) -> String {
        self.file_path(name).display().to_string()
    }
}
