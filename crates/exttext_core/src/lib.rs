//! Core logic for the external-storage text file app.
//! Gate, store, storage media, and the screen adapter all live here; platform
//! shells only render and forward callbacks.

pub mod access;
pub mod config;
pub mod logging;
pub mod screen;
pub mod storage;
pub mod store;

pub use access::capability::StorageCapability;
pub use access::gate::{
    AccessCheck, PendingRequest, PermissionError, PermissionOutcome, StorageAccessGate,
};
pub use access::host::{PermissionHost, ReportedPermissionHost};
pub use config::{ConfigError, StoreConfig, DEFAULT_FILE_NAME, STORAGE_DIR_ENV};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use screen::main_screen::{Lifecycle, MainScreen};
pub use screen::navigation::{MenuItem, Navigator, Screen, CREDITS_TEXT};
pub use screen::notice::{Notice, NoticeDuration};
pub use storage::fs_medium::FsStorageMedium;
pub use storage::medium::{MediumState, StorageMedium};
pub use storage::memory_medium::MemoryStorageMedium;
pub use store::text_store::FileTextStore;
pub use store::{StoreError, StoreResult};

/// Minimal health-check API for shell integration.
pub fn ping() -> &'static str {
    "pong"
}

pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
