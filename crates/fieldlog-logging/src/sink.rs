//! Backend sink capability
//!
//! The facade depends only on this trait. A sink owns output formatting,
//! threshold filtering and the fatal action that follows a `PANIC` record.

use fieldlog_core_types::{Level, LogRecord};
use fieldlog_errors::Result;

/// Output format requested from a sink
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One JSON object per record
    #[default]
    Json,
    /// `key=value` text lines for local development
    Text,
}

impl OutputFormat {
    /// Map a `LOG_FORMAT` value; anything but `text` selects JSON
    pub fn from_env_value(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("text") {
            OutputFormat::Text
        } else {
            OutputFormat::Json
        }
    }
}

/// Settings applied to a sink once, during initialization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkSettings {
    pub format: OutputFormat,
    pub min_level: Level,
}

impl Default for SinkSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::Json,
            min_level: Level::Error,
        }
    }
}

/// A log backend
///
/// `emit` must never fail the caller: write errors are absorbed by the
/// sink. Records whose severity does not pass the configured threshold are
/// dropped by the sink, not by the facade.
pub trait Sink: Send + Sync {
    /// Apply output format and minimum severity
    ///
    /// # Errors
    ///
    /// Returns `LogError::BackendConfiguration` if the backend cannot be set up.
    fn configure(&self, settings: &SinkSettings) -> Result<()>;

    /// Record a composed entry
    fn emit(&self, record: &LogRecord);

    /// Record a terminal entry, then raise an unrecoverable panic
    fn raise_fatal(&self, record: &LogRecord) -> ! {
        self.emit(record);
        panic!("{}", record.message);
    }
}
