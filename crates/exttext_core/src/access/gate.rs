//! Storage access gate.
//!
//! # Responsibility
//! - Report whether the medium is usable and the capability granted.
//! - Issue permission requests and route their outcomes back to waiters.
//!
//! # Invariants
//! - Medium state and grant state are read fresh on every check.
//! - Request ids start at `FIRST_REQUEST_ID` and are never reused.
//! - An outcome for an id the gate did not issue, or already completed, is ignored.
//! - Nothing is retried automatically after a grant.

use super::capability::StorageCapability;
use super::host::PermissionHost;
use crate::storage::medium::{MediumState, StorageMedium};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::time::Duration;

/// First request id handed out; matches the platform request code convention.
pub const FIRST_REQUEST_ID: u32 = 1;

/// Resolution delivered for one permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionOutcome {
    Granted,
    Denied,
}

impl PermissionOutcome {
    /// Maps platform grant results; only a leading `true` counts as granted.
    pub fn from_grants(grants: &[bool]) -> Self {
        match grants.first() {
            Some(true) => Self::Granted,
            _ => Self::Denied,
        }
    }

    pub fn is_granted(self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// Combined verdict of availability and permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "verdict", content = "medium_state")]
pub enum AccessCheck {
    Allowed,
    StorageUnavailable(MediumState),
    PermissionMissing,
}

impl AccessCheck {
    pub fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionError {
    /// The gate was dropped before the request was resolved.
    Abandoned(u32),
    TimedOut(u32),
}

impl Display for PermissionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Abandoned(id) => write!(f, "permission request {id} was abandoned"),
            Self::TimedOut(id) => write!(f, "permission request {id} timed out"),
        }
    }
}

impl Error for PermissionError {}

/// Handle for one in-flight permission request.
#[derive(Debug)]
pub struct PendingRequest {
    request_id: u32,
    capability: StorageCapability,
    receiver: Receiver<PermissionOutcome>,
}

impl PendingRequest {
    pub fn request_id(&self) -> u32 {
        self.request_id
    }

    pub fn capability(&self) -> StorageCapability {
        self.capability
    }

    /// Returns the outcome when it has already arrived.
    pub fn try_outcome(&self) -> Result<Option<PermissionOutcome>, PermissionError> {
        match self.receiver.try_recv() {
            Ok(outcome) => Ok(Some(outcome)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(PermissionError::Abandoned(self.request_id)),
        }
    }

    /// Blocks until the request resolves.
    pub fn wait(self) -> Result<PermissionOutcome, PermissionError> {
        self.receiver
            .recv()
            .map_err(|_| PermissionError::Abandoned(self.request_id))
    }

    pub fn wait_timeout(self, timeout: Duration) -> Result<PermissionOutcome, PermissionError> {
        self.receiver
            .recv_timeout(timeout)
            .map_err(|err| match err {
                RecvTimeoutError::Timeout => PermissionError::TimedOut(self.request_id),
                RecvTimeoutError::Disconnected => PermissionError::Abandoned(self.request_id),
            })
    }
}

/// Availability and permission gate in front of the text store.
pub struct StorageAccessGate<M: StorageMedium, H: PermissionHost> {
    medium: M,
    host: H,
    capability: StorageCapability,
    next_request_id: Cell<u32>,
    pending: RefCell<BTreeMap<u32, Sender<PermissionOutcome>>>,
}

impl<M: StorageMedium, H: PermissionHost> StorageAccessGate<M, H> {
    pub fn new(medium: M, host: H) -> Self {
        Self {
            medium,
            host,
            capability: StorageCapability::WriteExternalStorage,
            next_request_id: Cell::new(FIRST_REQUEST_ID),
            pending: RefCell::new(BTreeMap::new()),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn capability(&self) -> StorageCapability {
        self.capability
    }

    pub fn medium_state(&self) -> MediumState {
        self.medium.state()
    }

    /// True only when the medium is mounted read/write.
    pub fn is_storage_available(&self) -> bool {
        self.medium_state().is_available()
    }

    pub fn has_permission(&self) -> bool {
        self.host.is_granted(self.capability)
    }

    /// Availability first, then permission.
    pub fn check(&self) -> AccessCheck {
        let state = self.medium_state();
        if !state.is_available() {
            return AccessCheck::StorageUnavailable(state);
        }
        if !self.has_permission() {
            return AccessCheck::PermissionMissing;
        }
        AccessCheck::Allowed
    }

    /// Starts a platform prompt and returns immediately.
    pub fn request_access(&self) -> PendingRequest {
        let request_id = self.next_request_id.get();
        self.next_request_id.set(request_id.wrapping_add(1));

        let (sender, receiver) = mpsc::channel();
        self.pending.borrow_mut().insert(request_id, sender);

        info!(
            "event=permission_request module=access status=start request_id={} capability={}",
            request_id,
            self.capability.as_str()
        );
        self.host.prompt(self.capability, request_id);

        PendingRequest {
            request_id,
            capability: self.capability,
            receiver,
        }
    }

    /// Fire-and-forget form of `request_access`.
    pub fn request_permission(&self) -> u32 {
        self.request_access().request_id()
    }

    /// Delivers the platform callback for `request_id`.
    ///
    /// Returns `None` when the id is unknown or already completed.
    pub fn complete_request(&self, request_id: u32, grants: &[bool]) -> Option<PermissionOutcome> {
        let Some(sender) = self.pending.borrow_mut().remove(&request_id) else {
            warn!(
                "event=permission_result module=access status=skipped request_id={} reason=unknown_request",
                request_id
            );
            return None;
        };

        let outcome = PermissionOutcome::from_grants(grants);
        info!(
            "event=permission_result module=access status=ok request_id={} granted={}",
            request_id,
            outcome.is_granted()
        );
        // The waiter may have dropped its handle; the outcome still counts.
        let _ = sender.send(outcome);
        Some(outcome)
    }

    pub fn pending_request_ids(&self) -> Vec<u32> {
        self.pending.borrow().keys().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{AccessCheck, PermissionError, PermissionOutcome, StorageAccessGate};
    use crate::access::host::ReportedPermissionHost;
    use crate::storage::medium::MediumState;
    use crate::storage::memory_medium::MemoryStorageMedium;
    use std::time::Duration;

    #[test]
    fn check_reports_unavailable_before_missing_permission() {
        let medium = MemoryStorageMedium::new();
        medium.set_state(MediumState::Unmounted);
        let gate = StorageAccessGate::new(&medium, ReportedPermissionHost::new(false));
        assert_eq!(
            gate.check(),
            AccessCheck::StorageUnavailable(MediumState::Unmounted)
        );

        medium.set_state(MediumState::Mounted);
        assert_eq!(gate.check(), AccessCheck::PermissionMissing);

        gate.host().set_granted(true);
        assert!(gate.check().is_allowed());
    }

    #[test]
    fn grant_state_is_read_fresh() {
        let medium = MemoryStorageMedium::new();
        let host = ReportedPermissionHost::new(true);
        let gate = StorageAccessGate::new(&medium, &host);
        assert!(gate.has_permission());
        host.set_granted(false);
        assert!(!gate.has_permission());
    }

    #[test]
    fn request_ids_start_at_one_and_increase() {
        let medium = MemoryStorageMedium::new();
        let host = ReportedPermissionHost::new(false);
        let gate = StorageAccessGate::new(&medium, &host);

        let first = gate.request_access();
        let second = gate.request_permission();
        assert_eq!(first.request_id(), 1);
        assert_eq!(second, 2);
        assert_eq!(host.prompted_ids(), vec![1, 2]);
        assert_eq!(gate.pending_request_ids(), vec![1, 2]);
    }

    #[test]
    fn pending_request_receives_outcome_once_completed() {
        let medium = MemoryStorageMedium::new();
        let gate = StorageAccessGate::new(&medium, ReportedPermissionHost::new(false));
        let pending = gate.request_access();
        assert_eq!(pending.try_outcome().expect("not abandoned"), None);

        assert_eq!(
            gate.complete_request(pending.request_id(), &[true]),
            Some(PermissionOutcome::Granted)
        );
        assert_eq!(
            pending.wait_timeout(Duration::from_secs(1)),
            Ok(PermissionOutcome::Granted)
        );
    }

    #[test]
    fn unknown_or_repeated_results_are_ignored() {
        let medium = MemoryStorageMedium::new();
        let gate = StorageAccessGate::new(&medium, ReportedPermissionHost::new(false));
        assert_eq!(gate.complete_request(7, &[true]), None);

        let id = gate.request_permission();
        assert_eq!(gate.complete_request(id, &[]), Some(PermissionOutcome::Denied));
        assert_eq!(gate.complete_request(id, &[true]), None);
    }

    #[test]
    fn dropping_gate_abandons_waiters() {
        let medium = MemoryStorageMedium::new();
        let gate = StorageAccessGate::new(&medium, ReportedPermissionHost::new(false));
        let pending = gate.request_access();
        let id = pending.request_id();
        drop(gate);
        assert_eq!(pending.wait(), Err(PermissionError::Abandoned(id)));
    }

    #[test]
    fn only_leading_true_grant_counts() {
        assert_eq!(PermissionOutcome::from_grants(&[true, false]), PermissionOutcome::Granted);
        assert_eq!(PermissionOutcome::from_grants(&[false, true]), PermissionOutcome::Denied);
        assert_eq!(PermissionOutcome::from_grants(&[]), PermissionOutcome::Denied);
    }
}
