//! User-visible notices.

use crate::access::gate::PermissionOutcome;
use crate::store::StoreError;
use serde::{Deserialize, Serialize};

/// How long a notice stays on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeDuration {
    Short,
    Long,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Notice {
    PermissionGranted,
    PermissionDenied,
    /// Guard failure: medium unavailable or permission missing.
    StorageProblem,
    SaveFailed,
    ClearFailed,
}

/// Which write produced a store error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteAction {
    Save,
    Clear,
}

impl Notice {
    pub fn message(self) -> &'static str {
        match self {
            Self::PermissionGranted => "Permission to access external storage granted",
            Self::PermissionDenied => "Permission to access external storage NOT granted",
            Self::StorageProblem => "External memory or permission problem",
            Self::SaveFailed => "Failed to save text file",
            Self::ClearFailed => "Failed to clear text file",
        }
    }

    pub fn duration(self) -> NoticeDuration {
        match self {
            Self::PermissionGranted | Self::PermissionDenied => NoticeDuration::Long,
            Self::StorageProblem | Self::SaveFailed | Self::ClearFailed => NoticeDuration::Short,
        }
    }

    pub fn for_permission(outcome: PermissionOutcome) -> Self {
        match outcome {
            PermissionOutcome::Granted => Self::PermissionGranted,
            PermissionOutcome::Denied => Self::PermissionDenied,
        }
    }

    pub fn for_store_error(action: WriteAction, err: &StoreError) -> Self {
        if err.is_environment() {
            return Self::StorageProblem;
        }
        match action {
            WriteAction::Save => Self::SaveFailed,
            WriteAction::Clear => Self::ClearFailed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Notice, NoticeDuration, WriteAction};
    use crate::storage::medium::MediumState;
    use crate::store::StoreError;

    #[test]
    fn permission_notices_are_long_and_failures_short() {
        assert_eq!(Notice::PermissionGranted.duration(), NoticeDuration::Long);
        assert_eq!(Notice::PermissionDenied.duration(), NoticeDuration::Long);
        assert_eq!(Notice::SaveFailed.duration(), NoticeDuration::Short);
    }

    #[test]
    fn environment_errors_map_to_storage_problem_for_both_writes() {
        let unavailable = StoreError::StorageUnavailable(MediumState::Unmounted);
        assert_eq!(
            Notice::for_store_error(WriteAction::Save, &unavailable),
            Notice::StorageProblem
        );
        assert_eq!(
            Notice::for_store_error(WriteAction::Clear, &StoreError::PermissionMissing),
            Notice::StorageProblem
        );
    }

    #[test]
    fn io_errors_map_to_action_specific_notice() {
        let err = StoreError::Io(std::io::Error::other("disk"));
        assert_eq!(Notice::for_store_error(WriteAction::Save, &err), Notice::SaveFailed);
        assert_eq!(Notice::for_store_error(WriteAction::Clear, &err), Notice::ClearFailed);
        assert_eq!(Notice::ClearFailed.message(), "Failed to clear text file");
    }

    #[test]
    fn serializes_as_snake_case() {
        let json = serde_json::to_value(Notice::StorageProblem).expect("serialize");
        assert_eq!(json, "storage_problem");
    }
}
