//! Guarded text store use-cases.
//!
//! # Responsibility
//! - Run every write through the access gate before touching the medium.
//! - Keep reads unguarded and infallible.
//!
//! # Invariants
//! - A failed guard performs no I/O at all.
//! - Gate state is checked per call, never cached.

use super::text_file::TextFile;
use super::{StoreError, StoreResult};
use crate::access::gate::{AccessCheck, StorageAccessGate};
use crate::access::host::PermissionHost;
use crate::storage::medium::StorageMedium;
use log::warn;

/// Fixed-name text file behind the storage access gate.
pub struct FileTextStore<M: StorageMedium, H: PermissionHost> {
    file: TextFile<M>,
    gate: StorageAccessGate<M, H>,
}

impl<M: StorageMedium + Clone, H: PermissionHost> FileTextStore<M, H> {
    /// Creates a store for `file_name` directly under the medium's root.
    pub fn new(medium: M, host: H, file_name: &str) -> Self {
        Self {
            file: TextFile::new(medium.clone(), file_name),
            gate: StorageAccessGate::new(medium, host),
        }
    }
}

impl<M: StorageMedium, H: PermissionHost> FileTextStore<M, H> {
    pub fn gate(&self) -> &StorageAccessGate<M, H> {
        &self.gate
    }

    pub fn location(&self) -> String {
        self.file.location()
    }

    /// Appends `text` verbatim when the gate allows it.
    pub fn append(&self, text: &str) -> StoreResult<()> {
        self.guard("text_append")?;
        self.file.append(text)
    }

    /// Truncates the file to empty when the gate allows it.
    pub fn clear(&self) -> StoreResult<()> {
        self.guard("text_clear")?;
        self.file.clear()
    }

    /// Full contents, one `\n` per line; `""` when missing or unreadable.
    pub fn read_all(&self) -> String {
        self.file.read_all()
    }

    fn guard(&self, event: &str) -> StoreResult<()> {
        match self.gate.check() {
            AccessCheck::Allowed => Ok(()),
            AccessCheck::StorageUnavailable(state) => {
                warn!(
                    "event={} module=store status=skipped reason=storage_unavailable medium_state={}",
                    event,
                    state.as_str()
                );
                Err(StoreError::StorageUnavailable(state))
            }
            AccessCheck::PermissionMissing => {
                warn!(
                    "event={} module=store status=skipped reason=permission_missing",
                    event
                );
                Err(StoreError::PermissionMissing)
            }
        }
    }
}
