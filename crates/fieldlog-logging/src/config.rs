//! Facade configuration
//!
//! The configuration is read once by the host, usually from the process
//! environment, and then passed to `LogFacade::init`. Nothing in this crate
//! reads the environment on its own.

use crate::sink::{OutputFormat, SinkSettings};
use fieldlog_core_types::schema::{ENV_BUGSNAG_API_KEY, ENV_LOG_FORMAT, ENV_LOG_LEVEL};
use fieldlog_core_types::{Level, ReportingKey};

/// Settings fixed for the lifetime of a `LogFacade`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Minimum severity the sink keeps
    pub min_level: Level,
    /// Output format requested from the sink
    pub format: OutputFormat,
    /// Crash-reporting credential; `Some` requires a hook registrar
    pub reporting_key: Option<ReportingKey>,
    /// Write `function` / `file` / `row` into records
    pub capture_caller: bool,
    /// Prefix messages with `[SEVERITY] `
    pub tag_messages: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            min_level: Level::Error,
            format: OutputFormat::Json,
            reporting_key: None,
            capture_caller: true,
            tag_messages: false,
        }
    }
}

impl LoggingConfig {
    /// Read `LOG_LEVEL`, `LOG_FORMAT` and `BUGSNAG_API_KEY` from the process
    /// environment
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a configuration from any variable lookup
    ///
    /// # Example
    ///
    /// ```
    /// use fieldlog_logging::{Level, LoggingConfig};
    ///
    /// let config = LoggingConfig::from_lookup(|name| match name {
    ///     "LOG_LEVEL" => Some("INFO".to_string()),
    ///     _ => None,
    /// });
    /// assert_eq!(config.min_level, Level::Info);
    /// assert!(config.reporting_key.is_none());
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let min_level = lookup(ENV_LOG_LEVEL)
            .map(|value| Level::from_env_value(&value))
            .unwrap_or_default();
        let format = lookup(ENV_LOG_FORMAT)
            .map(|value| OutputFormat::from_env_value(&value))
            .unwrap_or_default();
        let reporting_key = lookup(ENV_BUGSNAG_API_KEY).and_then(ReportingKey::non_empty);

        Self {
            min_level,
            format,
            reporting_key,
            ..Self::default()
        }
    }

    pub fn with_min_level(mut self, min_level: Level) -> Self {
        self.min_level = min_level;
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the reporting credential; an empty key clears it
    pub fn with_reporting_key(mut self, key: impl Into<String>) -> Self {
        self.reporting_key = ReportingKey::non_empty(key);
        self
    }

    pub fn with_capture_caller(mut self, capture_caller: bool) -> Self {
        self.capture_caller = capture_caller;
        self
    }

    pub fn with_tag_messages(mut self, tag_messages: bool) -> Self {
        self.tag_messages = tag_messages;
        self
    }

    pub fn sink_settings(&self) -> SinkSettings {
        SinkSettings {
            format: self.format,
            min_level: self.min_level,
        }
    }
}
