//! Permission host contract and the reported-state host.

use super::capability::StorageCapability;
use std::cell::{Cell, RefCell};

/// Platform side of the permission subsystem.
///
/// The host owns the grant state. `prompt` only starts the platform dialog;
/// the outcome comes back later through `StorageAccessGate::complete_request`.
pub trait PermissionHost {
    fn is_granted(&self, capability: StorageCapability) -> bool;
    fn prompt(&self, capability: StorageCapability, request_id: u32);
}

impl<H: PermissionHost + ?Sized> PermissionHost for &H {
    fn is_granted(&self, capability: StorageCapability) -> bool {
        (**self).is_granted(capability)
    }

    fn prompt(&self, capability: StorageCapability, request_id: u32) {
        (**self).prompt(capability, request_id)
    }
}

/// Host whose grant state is reported by the embedder.
///
/// Used behind the FFI, where the mobile shell owns the real permission and
/// pushes its value in, and in tests.
#[derive(Debug, Default)]
pub struct ReportedPermissionHost {
    granted: Cell<bool>,
    prompts: RefCell<Vec<u32>>,
}

impl ReportedPermissionHost {
    pub fn new(granted: bool) -> Self {
        Self {
            granted: Cell::new(granted),
            prompts: RefCell::new(Vec::new()),
        }
    }

    pub fn set_granted(&self, granted: bool) {
        self.granted.set(granted);
    }

    /// Request ids the host was asked to prompt for, oldest first.
    pub fn prompted_ids(&self) -> Vec<u32> {
        self.prompts.borrow().clone()
    }
}

impl PermissionHost for ReportedPermissionHost {
    fn is_granted(&self, _capability: StorageCapability) -> bool {
        self.granted.get()
    }

    fn prompt(&self, _capability: StorageCapability, request_id: u32) {
        self.prompts.borrow_mut().push(request_id);
    }
}
