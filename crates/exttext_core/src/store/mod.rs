//! File text store.
//!
//! # Responsibility
//! - Append to, clear, and read back the single shared text file.
//! - Map environment and I/O failures onto `StoreError`.

use crate::storage::medium::MediumState;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;

pub mod text_file;
pub mod text_store;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
pub enum StoreError {
    /// Medium not mounted read/write; no I/O was attempted.
    StorageUnavailable(MediumState),
    /// Write capability not granted; no I/O was attempted.
    PermissionMissing,
    /// The medium failed after the guard passed.
    Io(io::Error),
}

impl StoreError {
    /// True for failures detected before any I/O.
    pub fn is_environment(&self) -> bool {
        matches!(self, Self::StorageUnavailable(_) | Self::PermissionMissing)
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StorageUnavailable(state) => {
                write!(f, "external storage unavailable: {}", state.as_str())
            }
            Self::PermissionMissing => write!(f, "external storage permission not granted"),
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::StorageUnavailable(_) | Self::PermissionMissing => None,
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}
