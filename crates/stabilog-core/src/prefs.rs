//! Names of the persisted preference values read by the report builder.
//!
//! Counter keys are read-and-reset when a report is assembled; fact keys
//! (bookmarks, keywords, install date) are only read.

// ---------------------------------------------------------------------------
// Required stability counters (always emitted)
// ---------------------------------------------------------------------------

pub const STABILITY_LAUNCH_COUNT: &str = "stability.launch_count";
pub const STABILITY_CRASH_COUNT: &str = "stability.crash_count";

// ---------------------------------------------------------------------------
// Realtime stability counters (emitted only when non-zero)
// ---------------------------------------------------------------------------

pub const STABILITY_PAGE_LOAD_COUNT: &str = "stability.page_load_count";
pub const STABILITY_RENDERER_CRASH_COUNT: &str = "stability.renderer_crash_count";
pub const STABILITY_EXTENSION_RENDERER_CRASH_COUNT: &str =
    "stability.extension_renderer_crash_count";
pub const STABILITY_RENDERER_HANG_COUNT: &str = "stability.renderer_hang_count";
pub const STABILITY_CHILD_PROCESS_CRASH_COUNT: &str = "stability.child_process_crash_count";

/// Platform-conditional: only read when system crash counters are enabled.
pub const STABILITY_OTHER_USER_CRASH_COUNT: &str = "stability.other_user_crash_count";
pub const STABILITY_KERNEL_CRASH_COUNT: &str = "stability.kernel_crash_count";
pub const STABILITY_SYSTEM_UNCLEAN_SHUTDOWNS: &str = "stability.system_unclean_shutdowns";

// ---------------------------------------------------------------------------
// Extended stability counters (full environment report only)
// ---------------------------------------------------------------------------

pub const STABILITY_INCOMPLETE_SESSION_END_COUNT: &str = "stability.incomplete_session_end_count";
pub const STABILITY_BREAKPAD_REGISTRATION_OK: &str = "stability.breakpad_registration_ok";
pub const STABILITY_BREAKPAD_REGISTRATION_FAIL: &str = "stability.breakpad_registration_fail";
pub const STABILITY_DEBUGGER_PRESENT: &str = "stability.debugger_present";
pub const STABILITY_DEBUGGER_NOT_PRESENT: &str = "stability.debugger_not_present";

// ---------------------------------------------------------------------------
// Facts
// ---------------------------------------------------------------------------

/// Accumulated uptime across reports, in seconds.
pub const UNINSTALL_METRICS_UPTIME_SEC: &str = "uninstall_metrics.uptime_sec";

/// Seconds since the epoch at which the client id was created, as a string.
pub const METRICS_CLIENT_ID_TIMESTAMP: &str = "user_experience_metrics.client_id_timestamp";

/// Persisted client identifier.
pub const METRICS_CLIENT_ID: &str = "user_experience_metrics.client_id";

/// Incremented once per built report; used as the session id.
pub const METRICS_SESSION_ID: &str = "user_experience_metrics.session_id";

pub const NUM_BOOKMARKS_ON_BOOKMARK_BAR: &str = "num_bookmarks_on_bookmark_bar";
pub const NUM_FOLDERS_ON_BOOKMARK_BAR: &str = "num_folders_on_bookmark_bar";
pub const NUM_BOOKMARKS_IN_OTHER_BOOKMARK_FOLDER: &str = "num_bookmarks_in_other_bookmark_folder";
pub const NUM_FOLDERS_IN_OTHER_BOOKMARK_FOLDER: &str = "num_folders_in_other_bookmark_folder";
pub const NUM_KEYWORDS: &str = "num_keywords";

/// Prefix of the per-profile entries in the profile metrics dictionary.
pub const PROFILE_PREFIX: &str = "profile-";
