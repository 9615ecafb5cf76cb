//! Canonical schema constants for log records and configuration
//!
//! These constants keep record keys and environment names consistent
//! between the facade, the sinks and the reporters.

// Reserved record fields, always owned by the facade
pub const FIELD_SEVERITY: &str = "severity";
pub const FIELD_FUNCTION: &str = "function";
pub const FIELD_FILE: &str = "file";
pub const FIELD_ROW: &str = "row";

/// Every key the facade overwrites on emission
pub const RESERVED_FIELDS: [&str; 4] = [FIELD_SEVERITY, FIELD_FUNCTION, FIELD_FILE, FIELD_ROW];

/// Caller-metadata keys, cleared and recomputed on every emission
pub const CALLER_FIELDS: [&str; 3] = [FIELD_FUNCTION, FIELD_FILE, FIELD_ROW];

// Backend keys written by the JSON sink
pub const KEY_LEVEL: &str = "level";
pub const KEY_MSG: &str = "msg";
pub const KEY_TIME: &str = "time";

/// Prefix applied to custom fields that clash with backend keys
pub const CLASH_PREFIX: &str = "fields.";

// Environment
pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";
pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";
pub const ENV_BUGSNAG_API_KEY: &str = "BUGSNAG_API_KEY";
pub const ENV_BUGSNAG_RELEASE_STAGE: &str = "BUGSNAG_RELEASE_STAGE";
pub const ENV_BUGSNAG_APP_VERSION: &str = "BUGSNAG_APP_VERSION";
pub const ENV_BUGSNAG_NOTIFY_ENDPOINT: &str = "BUGSNAG_NOTIFY_ENDPOINT";

/// Target used by the facade's own tracing diagnostics
pub const DIAGNOSTICS_TARGET: &str = "fieldlog";

/// Check whether a key belongs to the facade rather than the caller
pub fn is_reserved(key: &str) -> bool {
    RESERVED_FIELDS.contains(&key)
}
