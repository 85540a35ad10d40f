//! Protocol constants
//!
//! Field names and defaults shared by the handshake and sync requests.

/// Session identifier field, returned by connect and sent with login.
pub const PARAM_SESSION_ID: &str = "sessid";
/// Username field (login) and account name field (sync fetches).
pub const PARAM_USERNAME: &str = "name";
/// Password field (login) and auth token field (sync fetches).
pub const PARAM_PASSWORD: &str = "pass";
/// Last sync point field for friend updates.
pub const PARAM_UPDATED: &str = "timestamp";

/// `chrono` format string for the `timestamp` form field (`yyyy/MM/dd HH:mm`).
pub const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M";

pub const DEFAULT_CONNECT_PATH: &str = "/system/connect.json";
pub const DEFAULT_LOGIN_PATH: &str = "/user/login.json";
pub const DEFAULT_FRIEND_UPDATES_PATH: &str = "/fetch_friend_updates";
pub const DEFAULT_STATUS_PATH: &str = "/fetch_status";

// Transport timeouts
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_READ_TIMEOUT_SECS: u64 = 30;

pub const MIME_JSON: &str = "application/json";
