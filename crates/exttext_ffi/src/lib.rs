//! FFI bindings for the mobile shell.
//! Use-case level calls only; all behavior lives in `exttext_core`.

pub mod api;
