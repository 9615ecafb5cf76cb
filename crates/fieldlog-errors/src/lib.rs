//! Error facility for fieldlog
//!
//! Logging itself never fails a caller. The errors here cover the few places
//! where something can go wrong: setting up a backend, registering a
//! crash-reporting hook, and delivering a report. Each error maps to a
//! stable kind and code so hosts can react to startup failures
//! programmatically.

use thiserror::Error;

/// Result type alias using LogError
pub type Result<T> = std::result::Result<T, LogError>;

/// Canonical error kind taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogErrorKind {
    // Hook registration
    InvalidReportingKey,
    HookUnavailable,
    HookRegistration,

    // Backend
    BackendConfiguration,

    // Reporting transport
    Delivery,
    Serialization,
}

impl LogErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            LogErrorKind::InvalidReportingKey => "ERR_INVALID_REPORTING_KEY",
            LogErrorKind::HookUnavailable => "ERR_HOOK_UNAVAILABLE",
            LogErrorKind::HookRegistration => "ERR_HOOK_REGISTRATION",
            LogErrorKind::BackendConfiguration => "ERR_BACKEND_CONFIGURATION",
            LogErrorKind::Delivery => "ERR_DELIVERY",
            LogErrorKind::Serialization => "ERR_SERIALIZATION",
        }
    }

    /// Whether this kind can only occur while initializing the facade
    pub fn is_startup(&self) -> bool {
        matches!(
            self,
            LogErrorKind::InvalidReportingKey
                | LogErrorKind::HookUnavailable
                | LogErrorKind::HookRegistration
                | LogErrorKind::BackendConfiguration
        )
    }
}

/// Errors raised by fieldlog
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LogError {
    /// The reporting key is present but malformed
    #[error("Invalid reporting key: {reason}")]
    InvalidReportingKey { reason: String },

    /// A reporting key was configured but no hook registrar was supplied
    #[error("A reporting key is configured but no reporting hook is available")]
    HookUnavailable,

    /// The reporting hook could not be built
    #[error("Failed to register reporting hook: {reason}")]
    HookRegistration { reason: String },

    /// The sink rejected its output format or threshold
    #[error("Failed to configure log backend: {reason}")]
    BackendConfiguration { reason: String },

    /// A report could not be delivered to the reporting service
    #[error("Failed to deliver report{}: {reason}", status_suffix(.status))]
    Delivery { status: Option<u16>, reason: String },

    /// A record could not be serialized
    #[error("Failed to serialize record: {reason}")]
    Serialization { reason: String },
}

impl LogError {
    /// Get the error kind
    pub fn kind(&self) -> LogErrorKind {
        match self {
            LogError::InvalidReportingKey { .. } => LogErrorKind::InvalidReportingKey,
            LogError::HookUnavailable => LogErrorKind::HookUnavailable,
            LogError::HookRegistration { .. } => LogErrorKind::HookRegistration,
            LogError::BackendConfiguration { .. } => LogErrorKind::BackendConfiguration,
            LogError::Delivery { .. } => LogErrorKind::Delivery,
            LogError::Serialization { .. } => LogErrorKind::Serialization,
        }
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind().code()
    }

    pub fn hook_registration(reason: impl Into<String>) -> Self {
        LogError::HookRegistration {
            reason: reason.into(),
        }
    }

    pub fn backend(reason: impl Into<String>) -> Self {
        LogError::BackendConfiguration {
            reason: reason.into(),
        }
    }

    pub fn delivery(status: Option<u16>, reason: impl Into<String>) -> Self {
        LogError::Delivery {
            status,
            reason: reason.into(),
        }
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (status {s})")).unwrap_or_default()
}

impl From<serde_json::Error> for LogError {
    fn from(err: serde_json::Error) -> Self {
        LogError::Serialization {
            reason: err.to_string(),
        }
    }
}
