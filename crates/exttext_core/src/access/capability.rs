//! Platform capability the store is gated on.

use serde::{Deserialize, Serialize};

/// Stable id for the external-storage write capability.
pub const CAPABILITY_WRITE_EXTERNAL_STORAGE: &str = "write_external_storage";

/// Host-granted capability checked before any store I/O.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageCapability {
    WriteExternalStorage,
}

impl StorageCapability {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::WriteExternalStorage => CAPABILITY_WRITE_EXTERNAL_STORAGE,
        }
    }

    /// Text shown next to the platform permission prompt.
    pub fn description(self) -> &'static str {
        match self {
            Self::WriteExternalStorage => {
                "Allow reading and writing the shared text file on external storage."
            }
        }
    }
}
