//! Severity classification
//!
//! `Level` is the ordered threshold a sink filters on. `Severity` is the tag
//! carried by a record; it adds the terminal `Panic` action, which is never
//! filtered out.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum severity threshold
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    Debug,
    Info,
    Warning,
    #[default]
    Error,
}

impl Level {
    /// Map an environment-style value to a level
    ///
    /// Only the exact upper-case names are recognized. Anything else,
    /// including the empty string, maps to `Level::Error`.
    ///
    /// # Example
    ///
    /// ```
    /// use fieldlog_core_types::Level;
    ///
    /// assert_eq!(Level::from_env_value("INFO"), Level::Info);
    /// assert_eq!(Level::from_env_value("info"), Level::Error);
    /// ```
    pub fn from_env_value(value: &str) -> Self {
        match value {
            "DEBUG" => Level::Debug,
            "INFO" => Level::Info,
            "WARNING" => Level::Warning,
            "ERROR" => Level::Error,
            _ => Level::Error,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity tag of an emitted record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Error,
    Panic,
}

impl Severity {
    /// Name written to the `severity` field
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
            Severity::Panic => "PANIC",
        }
    }

    /// Lower-case name used by backends for their own `level` key
    pub fn backend_name(&self) -> &'static str {
        match self {
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Panic => "panic",
        }
    }

    /// Filterable level, `None` for the terminal `Panic`
    pub fn level(&self) -> Option<Level> {
        match self {
            Severity::Debug => Some(Level::Debug),
            Severity::Info => Some(Level::Info),
            Severity::Warning => Some(Level::Warning),
            Severity::Error => Some(Level::Error),
            Severity::Panic => None,
        }
    }

    /// Whether a record with this severity passes the `min` threshold
    pub fn is_enabled(&self, min: Level) -> bool {
        self.level().map_or(true, |level| level >= min)
    }

    /// Whether this severity is forwarded to crash reporting
    pub fn is_reportable(&self) -> bool {
        *self >= Severity::Error
    }
}

impl From<Level> for Severity {
    fn from(level: Level) -> Self {
        match level {
            Level::Debug => Severity::Debug,
            Level::Info => Severity::Info,
            Level::Warning => Severity::Warning,
            Level::Error => Severity::Error,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
