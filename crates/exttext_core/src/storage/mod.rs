//! Storage media the text store writes through.
//!
//! # Responsibility
//! - Abstract the shared external storage area behind `StorageMedium`.
//! - Provide a real directory-backed medium and an in-memory stand-in.

pub mod fs_medium;
pub mod medium;
pub mod memory_medium;
