//! FFI use-case API for the mobile shell.
//!
//! # Responsibility
//! - Expose the main-screen actions as sync calls over FRB.
//! - Carry the platform's permission state in with each call.
//!
//! # Invariants
//! - Exported functions never panic across the FFI boundary.
//! - One screen session per process; `screen_open` starts a fresh one.
//! - A finished session refuses further actions until `screen_open`.

use exttext_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    FsStorageMedium, MainScreen, Notice, NoticeDuration, ReportedPermissionHost, StoreConfig,
    CREDITS_TEXT,
};
use log::warn;
use std::sync::{Mutex, MutexGuard, OnceLock};

type Session = MainScreen<FsStorageMedium, ReportedPermissionHost>;

static STORE_CONFIG: OnceLock<Result<StoreConfig, String>> = OnceLock::new();
static SESSION: OnceLock<Mutex<Option<Session>>> = OnceLock::new();

#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - `level`: `trace|debug|info|warn|error`, case-insensitive.
/// - `log_dir`: absolute directory for rolling logs.
/// - Returns empty string on success, error message otherwise.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// One notice to show as a toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeItem {
    pub message: String,
    /// `true` for the long toast duration.
    pub long: bool,
}

/// Screen state after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenResponse {
    pub ok: bool,
    pub input: String,
    pub display: String,
    pub notices: Vec<NoticeItem>,
    /// Set when the shell must show the platform permission dialog.
    pub permission_request_id: Option<u32>,
    /// Set when the shell must close the screen.
    pub finished: bool,
    /// Diagnostics for `ok == false`.
    pub message: String,
}

impl ScreenResponse {
    fn from_session(session: &mut Session, permission_request_id: Option<u32>) -> Self {
        Self {
            ok: true,
            input: session.input().to_string(),
            display: session.display().to_string(),
            notices: session
                .take_notices()
                .into_iter()
                .map(to_notice_item)
                .collect(),
            permission_request_id,
            finished: session.is_finished(),
            message: String::new(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            input: String::new(),
            display: String::new(),
            notices: Vec::new(),
            permission_request_id: None,
            finished: false,
            message: message.into(),
        }
    }
}

/// Storage diagnostics for the settings/debug surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageStatusResponse {
    pub medium_state: String,
    pub available: bool,
    pub location: String,
}

/// Starts a fresh screen session.
///
/// # FFI contract
/// - Loads the file into `display` when access is possible.
/// - Otherwise returns `permission_request_id`; answer it with `permission_result`.
#[flutter_rust_bridge::frb(sync)]
pub fn screen_open(permission_granted: bool) -> ScreenResponse {
    let config = match resolve_store_config() {
        Ok(config) => config,
        Err(err) => return ScreenResponse::failure(format!("screen_open failed: {err}")),
    };
    let mut slot = lock_session();
    let session = slot.insert(new_session(&config, permission_granted));
    let pending = session.open();
    ScreenResponse::from_session(session, pending.map(|request| request.request_id()))
}

/// Appends `input` to the file.
#[flutter_rust_bridge::frb(sync)]
pub fn screen_save(input: String, permission_granted: bool) -> ScreenResponse {
    with_session(permission_granted, "screen_save", |session| {
        session.set_input(input);
        session.save();
    })
}

/// Truncates the file and clears both fields.
#[flutter_rust_bridge::frb(sync)]
pub fn screen_reset(permission_granted: bool) -> ScreenResponse {
    with_session(permission_granted, "screen_reset", |session| session.reset())
}

/// Appends `input`, then reports `finished = true` whatever the save outcome.
#[flutter_rust_bridge::frb(sync)]
pub fn screen_exit(input: String, permission_granted: bool) -> ScreenResponse {
    with_session(permission_granted, "screen_exit", |session| {
        session.set_input(input);
        session.save_and_exit();
    })
}

/// Platform permission callback.
///
/// `grants` holds one entry per requested permission; unknown ids are ignored.
#[flutter_rust_bridge::frb(sync)]
pub fn permission_result(request_id: u32, grants: Vec<bool>) -> ScreenResponse {
    let granted = grants.first().copied().unwrap_or(false);
    with_session(granted, "permission_result", |session| {
        session.on_permission_result(request_id, &grants);
    })
}

/// Current file contents, one `\n` per line.
///
/// Reads are not guarded, so this never prompts and works on a finished
/// session. Returns `""` when the file is missing or unreadable.
#[flutter_rust_bridge::frb(sync)]
pub fn text_read_all() -> String {
    let slot = lock_session();
    if let Some(session) = slot.as_ref() {
        return session.store().read_all();
    }
    drop(slot);
    match resolve_store_config() {
        Ok(config) => new_session(&config, false).store().read_all(),
        Err(_) => {
            warn!("event=text_read_all module=ffi status=error reason=config");
            String::new()
        }
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn storage_status() -> StorageStatusResponse {
    match resolve_store_config() {
        Ok(config) => {
            let session = new_session(&config, false);
            let state = session.gate().medium_state();
            StorageStatusResponse {
                medium_state: state.as_str().to_string(),
                available: state.is_available(),
                location: session.store().location(),
            }
        }
        Err(err) => StorageStatusResponse {
            medium_state: "unknown".to_string(),
            available: false,
            location: err,
        },
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn credits_text() -> String {
    CREDITS_TEXT.to_string()
}

fn with_session(
    permission_granted: bool,
    action: &str,
    f: impl FnOnce(&mut Session),
) -> ScreenResponse {
    let config = match resolve_store_config() {
        Ok(config) => config,
        Err(err) => return ScreenResponse::failure(format!("{action} failed: {err}")),
    };
    let mut slot = lock_session();
    let session = slot.get_or_insert_with(|| new_session(&config, permission_granted));
    if session.is_finished() {
        warn!("event={action} module=ffi status=refused reason=session_finished");
        return ScreenResponse::failure(format!(
            "{action} refused: session finished; call screen_open"
        ));
    }
    session.gate().host().set_granted(permission_granted);
    f(session);
    ScreenResponse::from_session(session, None)
}

fn new_session(config: &StoreConfig, permission_granted: bool) -> Session {
    MainScreen::new(
        FsStorageMedium::new(config.storage_root()),
        ReportedPermissionHost::new(permission_granted),
        config.file_name(),
    )
}

fn lock_session() -> MutexGuard<'static, Option<Session>> {
    SESSION
        .get_or_init(|| Mutex::new(None))
        .lock()
        .unwrap_or_else(|poisoned| {
            warn!("event=session_lock module=ffi status=recovered reason=poisoned");
            poisoned.into_inner()
        })
}

fn resolve_store_config() -> Result<StoreConfig, String> {
    STORE_CONFIG
        .get_or_init(|| StoreConfig::from_env().map_err(|err| err.to_string()))
        .clone()
}

fn to_notice_item(notice: Notice) -> NoticeItem {
    NoticeItem {
        message: notice.message().to_string(),
        long: notice.duration() == NoticeDuration::Long,
    }
}
