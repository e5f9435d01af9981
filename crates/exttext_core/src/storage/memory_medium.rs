//! In-memory medium stand-in for tests and previews.

use super::medium::{MediumState, StorageMedium};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::io;

#[derive(Debug, Default)]
struct MemoryFile {
    bytes: Vec<u8>,
    revision: u64,
}

/// Single-threaded in-memory medium.
///
/// Each successful mutation bumps the file's revision, standing in for a
/// modification time.
#[derive(Debug)]
pub struct MemoryStorageMedium {
    state: Cell<MediumState>,
    fail_writes: Cell<bool>,
    fail_reads: Cell<bool>,
    files: RefCell<HashMap<String, MemoryFile>>,
}

impl Default for MemoryStorageMedium {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStorageMedium {
    /// Creates an empty, mounted medium.
    pub fn new() -> Self {
        Self {
            state: Cell::new(MediumState::Mounted),
            fail_writes: Cell::new(false),
            fail_reads: Cell::new(false),
            files: RefCell::new(HashMap::new()),
        }
    }

    pub fn set_state(&self, state: MediumState) {
        self.state.set(state);
    }

    /// Makes every subsequent append/truncate fail with an I/O error.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Makes every subsequent read fail with an I/O error.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.set(fail);
    }

    /// Seeds raw bytes without touching the revision counter.
    pub fn seed(&self, name: &str, bytes: &[u8]) {
        self.files
            .borrow_mut()
            .entry(name.to_string())
            .or_default()
            .bytes = bytes.to_vec();
    }

    pub fn contents(&self, name: &str) -> Option<Vec<u8>> {
        self.files.borrow().get(name).map(|file| file.bytes.clone())
    }

    /// Number of successful mutations applied to `name`; `0` when absent.
    pub fn revision(&self, name: &str) -> u64 {
        self.files
            .borrow()
            .get(name)
            .map(|file| file.revision)
            .unwrap_or(0)
    }

    pub fn exists(&self, name: &str) -> bool {
        self.files.borrow().contains_key(name)
    }

    fn check_writable(&self) -> io::Result<()> {
        if self.fail_writes.get() {
            return Err(io::Error::other("injected write failure"));
        }
        match self.state.get() {
            MediumState::Mounted => Ok(()),
            MediumState::MountedReadOnly => Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "medium is read-only",
            )),
            MediumState::Unmounted | MediumState::Removed => Err(io::Error::new(
                io::ErrorKind::NotFound,
                "medium is not mounted",
            )),
        }
    }
}

impl StorageMedium for MemoryStorageMedium {
    fn state(&self) -> MediumState {
        self.state.get()
    }

    fn append(&self, name: &str, bytes: &[u8]) -> io::Result<()> {
        self.check_writable()?;
        let mut files = self.files.borrow_mut();
        let file = files.entry(name.to_string()).or_default();
        file.bytes.extend_from_slice(bytes);
        file.revision += 1;
        Ok(())
    }

    fn truncate(&self, name: &str) -> io::Result<()> {
        self.check_writable()?;
        let mut files = self.files.borrow_mut();
        let file = files.entry(name.to_string()).or_default();
        file.bytes.clear();
        file.revision += 1;
        Ok(())
    }

    fn read(&self, name: &str) -> io::Result<Vec<u8>> {
        if self.fail_reads.get() {
            return Err(io::Error::other("injected read failure"));
        }
        self.files
            .borrow()
            .get(name)
            .map(|file| file.bytes.clone())
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("{name} not found")))
    }

    fn describe(&self, name: &str) -> String {
        format!("memory://{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryStorageMedium;
    use crate::storage::medium::{MediumState, StorageMedium};

    #[test]
    fn mutations_bump_revision_and_seed_does_not() {
        let medium = MemoryStorageMedium::new();
        medium.seed("f", b"seeded");
        assert_eq!(medium.revision("f"), 0);

        medium.append("f", b"+more").expect("append");
        medium.truncate("f").expect("truncate");
        assert_eq!(medium.revision("f"), 2);
        assert_eq!(medium.contents("f").expect("file exists"), b"");
    }

    #[test]
    fn injected_write_failure_leaves_file_untouched() {
        let medium = MemoryStorageMedium::new();
        medium.append("f", b"keep").expect("append");
        medium.fail_writes(true);

        assert!(medium.append("f", b"lost").is_err());
        assert!(medium.truncate("f").is_err());
        assert_eq!(medium.contents("f").expect("file exists"), b"keep");
        assert_eq!(medium.revision("f"), 1);
    }

    #[test]
    fn read_only_medium_refuses_writes() {
        let medium = MemoryStorageMedium::new();
        medium.set_state(MediumState::MountedReadOnly);
        let err = medium.append("f", b"x").expect_err("read-only");
        assert_eq!(err.kind(), std::io::ErrorKind::PermissionDenied);
        assert!(!medium.exists("f"));
    }
}
