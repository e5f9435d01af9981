//! Storage access gate: medium availability plus host permission.
//!
//! The permission request is the only asynchronous boundary in the crate.
//! `StorageAccessGate::request_access` returns a `PendingRequest` at once; the
//! platform callback later resolves it through `complete_request`.

pub mod capability;
pub mod gate;
pub mod host;
