//! Presentation adapter over the gate and the store.
//!
//! Keeps menu, navigation, and permission-dialog plumbing out of the core
//! components. Platform shells (FFI, CLI) drive `MainScreen` and render its
//! fields and notices.

pub mod main_screen;
pub mod navigation;
pub mod notice;
