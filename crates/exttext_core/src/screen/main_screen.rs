//! Main screen session: input field, display field, and actions.
//!
//! # Responsibility
//! - Translate UI actions into store calls and store results into notices.
//! - Own navigation between the main and credits screens.
//!
//! # Invariants
//! - A permission grant only produces a notice; the blocked action is not
//!   replayed. Callers that want a retry await the `PendingRequest` themselves.
//! - `exit` finishes the session whatever the save outcome was.

use super::navigation::{MenuItem, Navigator, Screen};
use super::notice::{Notice, WriteAction};
use crate::access::gate::{PendingRequest, StorageAccessGate};
use crate::access::host::PermissionHost;
use crate::storage::medium::StorageMedium;
use crate::store::text_store::FileTextStore;
use log::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Active,
    Finished,
}

pub struct MainScreen<M: StorageMedium, H: PermissionHost> {
    store: FileTextStore<M, H>,
    input: String,
    display: String,
    notices: Vec<Notice>,
    lifecycle: Lifecycle,
    navigator: Navigator,
}

impl<M: StorageMedium + Clone, H: PermissionHost> MainScreen<M, H> {
    pub fn new(medium: M, host: H, file_name: &str) -> Self {
        Self::with_store(FileTextStore::new(medium, host, file_name))
    }
}

impl<M: StorageMedium, H: PermissionHost> MainScreen<M, H> {
    pub fn with_store(store: FileTextStore<M, H>) -> Self {
        Self {
            store,
            input: String::new(),
            display: String::new(),
            notices: Vec::new(),
            lifecycle: Lifecycle::Active,
            navigator: Navigator::new(),
        }
    }

    /// Screen creation: shows the file when access is already possible,
    /// otherwise asks the host for permission.
    pub fn open(&mut self) -> Option<PendingRequest> {
        let gate = self.store.gate();
        if gate.has_permission() && gate.is_storage_available() {
            self.display = self.store.read_all();
            info!("event=screen_open module=screen status=ok loaded=true");
            return None;
        }
        info!("event=screen_open module=screen status=ok loaded=false");
        Some(gate.request_access())
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    /// Reloads the display field from the file.
    pub fn refresh_display(&mut self) {
        self.display = self.store.read_all();
    }

    /// Appends the input to the file and refreshes the display.
    pub fn save(&mut self) {
        match self.store.append(&self.input) {
            Ok(()) => self.display = self.store.read_all(),
            Err(err) => self
                .notices
                .push(Notice::for_store_error(WriteAction::Save, &err)),
        }
    }

    /// Truncates the file and empties both fields.
    ///
    /// Fields are emptied even when the truncate itself failed, but not when
    /// the guard refused the operation.
    pub fn reset(&mut self) {
        if let Err(err) = self.store.clear() {
            self.notices
                .push(Notice::for_store_error(WriteAction::Clear, &err));
            if err.is_environment() {
                return;
            }
        }
        self.input.clear();
        self.display.clear();
    }

    /// Saves the input, then finishes the session.
    pub fn exit(&mut self) {
        self.save();
        self.lifecycle = Lifecycle::Finished;
        info!("event=screen_exit module=screen status=ok");
    }

    pub fn save_and_exit(&mut self) {
        self.exit();
    }

    /// Platform permission callback.
    ///
    /// Unknown request codes are ignored and produce no notice.
    pub fn on_permission_result(&mut self, request_code: u32, grants: &[bool]) -> Option<Notice> {
        let outcome = self.store.gate().complete_request(request_code, grants)?;
        let notice = Notice::for_permission(outcome);
        self.notices.push(notice);
        Some(notice)
    }

    /// Drains queued notices, oldest first.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_finished(&self) -> bool {
        self.lifecycle == Lifecycle::Finished
    }

    pub fn current_screen(&self) -> Screen {
        self.navigator.current()
    }

    pub fn select_menu(&mut self, item: MenuItem) -> bool {
        self.navigator.select(item)
    }

    pub fn back(&mut self) -> bool {
        self.navigator.back()
    }

    pub fn gate(&self) -> &StorageAccessGate<M, H> {
        self.store.gate()
    }

    pub fn store(&self) -> &FileTextStore<M, H> {
        &self.store
    }
}
