//! Storage medium contract.

use serde::{Deserialize, Serialize};
use std::io;

/// Mount state reported by a storage medium.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediumState {
    /// Present with read/write access.
    Mounted,
    /// Present but writes are refused.
    MountedReadOnly,
    /// Not attached.
    Unmounted,
    /// Path exists but is not a usable storage root.
    Removed,
}

impl MediumState {
    /// Only a read/write mount is usable for the text store.
    pub fn is_available(self) -> bool {
        matches!(self, Self::Mounted)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mounted => "mounted",
            Self::MountedReadOnly => "mounted_read_only",
            Self::Unmounted => "unmounted",
            Self::Removed => "removed",
        }
    }
}

/// A shared storage area holding named files.
///
/// Each call acquires and releases its own handle; implementations never keep
/// a file open between calls.
pub trait StorageMedium {
    /// Current mount state. Must be read fresh on every call.
    fn state(&self) -> MediumState;

    /// Appends `bytes` to `name`, creating the file when missing.
    fn append(&self, name: &str, bytes: &[u8]) -> io::Result<()>;

    /// Truncates `name` to zero length, creating the file when missing.
    fn truncate(&self, name: &str) -> io::Result<()>;

    /// Reads every byte of `name`. Missing files yield `NotFound`.
    fn read(&self, name: &str) -> io::Result<Vec<u8>>;

    /// Human-readable location of `name`, used in logs and status output.
    fn describe(&self, name: &str) -> String;
}

impl<M: StorageMedium + ?Sized> StorageMedium for &M {
    fn state(&self) -> MediumState {
        (**self).state()
    }

    fn append(&self, name: &str, bytes: &[u8]) -> io::Result<()> {
        (**self).append(name, bytes)
    }

    fn truncate(&self, name: &str) -> io::Result<()> {
        (**self).truncate(name)
    }

    fn read(&self, name: &str) -> io::Result<Vec<u8>> {
        (**self).read(name)
    }

    fn describe(&self, name: &str) -> String {
        (**self).describe(name)
    }
}
