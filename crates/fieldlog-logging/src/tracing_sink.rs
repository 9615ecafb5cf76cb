//! Sink forwarding records into `tracing`
//!
//! Reserved fields become tracing fields. Custom fields have dynamic names,
//! which tracing cannot express, so they are serialized into one `fields`
//! JSON string.

use crate::sink::{OutputFormat, Sink, SinkSettings};
use fieldlog_core_types::schema::{FIELD_FILE, FIELD_FUNCTION, FIELD_ROW};
use fieldlog_core_types::{Level, LogRecord, Severity};
use fieldlog_errors::{LogError, Result};
use serde_json::{Map, Value};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Once;
use tracing_subscriber::EnvFilter;

/// Target of every event produced by `TracingSink`
pub const RECORD_TARGET: &str = "fieldlog::record";

static SUBSCRIBER_ONCE: Once = Once::new();

/// Sink that emits each record as a tracing event
pub struct TracingSink {
    install_subscriber: bool,
    min_level: AtomicU8,
}

impl TracingSink {
    /// Install a global `tracing_subscriber` fmt subscriber on configure
    ///
    /// `RUST_LOG` overrides the threshold-derived filter, as with any
    /// `EnvFilter`. Installation happens at most once per process.
    pub fn installing() -> Self {
        Self::with_install(true)
    }

    /// Use whatever subscriber the host has installed
    pub fn attached() -> Self {
        Self::with_install(false)
    }

    fn with_install(install_subscriber: bool) -> Self {
        Self {
            install_subscriber,
            min_level: AtomicU8::new(level_to_u8(Level::Error)),
        }
    }

    fn min_level(&self) -> Level {
        level_from_u8(self.min_level.load(Ordering::Relaxed))
    }
}

fn level_to_u8(level: Level) -> u8 {
    match level {
        Level::Debug => 0,
        Level::Info => 1,
        Level::Warning => 2,
        Level::Error => 3,
    }
}

fn level_from_u8(value: u8) -> Level {
    match value {
        0 => Level::Debug,
        1 => Level::Info,
        2 => Level::Warning,
        _ => Level::Error,
    }
}

/// Directive used when `RUST_LOG` is not set
pub fn filter_directive(level: Level) -> &'static str {
    match level {
        Level::Debug => "debug",
        Level::Info => "info",
        Level::Warning => "warn",
        Level::Error => "error",
    }
}

fn install(settings: &SinkSettings) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(settings.min_level)));

    let installed = match settings.format {
        OutputFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .try_init(),
        OutputFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).try_init(),
    };
    installed.map_err(|err| LogError::backend(err.to_string()))
}

/// Serialize the non-reserved fields of a record
fn custom_fields_json(record: &LogRecord) -> String {
    let custom: Map<String, Value> = record
        .custom_fields()
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    Value::Object(custom).to_string()
}

macro_rules! forward {
    ($level:expr, $record:expr, $custom:expr, $row:expr) => {
        tracing::event!(
            target: RECORD_TARGET,
            $level,
            severity = $record.severity.as_str(),
            function = $record.field_str(FIELD_FUNCTION),
            file = $record.field_str(FIELD_FILE),
            row = $row,
            fields = %$custom,
            "{}",
            $record.message
        )
    };
}

impl Sink for TracingSink {
    fn configure(&self, settings: &SinkSettings) -> Result<()> {
        self.min_level
            .store(level_to_u8(settings.min_level), Ordering::Relaxed);

        if !self.install_subscriber {
            return Ok(());
        }
        let mut result = Ok(());
        SUBSCRIBER_ONCE.call_once(|| result = install(settings));
        result
    }

    fn emit(&self, record: &LogRecord) {
        if !record.severity.is_enabled(self.min_level()) {
            return;
        }
        let custom = custom_fields_json(record);
        let row = record.field(FIELD_ROW).and_then(serde_json::Value::as_u64);
        match record.severity {
            Severity::Debug => forward!(tracing::Level::DEBUG, record, custom, row),
            Severity::Info => forward!(tracing::Level::INFO, record, custom, row),
            Severity::Warning => forward!(tracing::Level::WARN, record, custom, row),
            Severity::Error | Severity::Panic => {
                forward!(tracing::Level::ERROR, record, custom, row)
            }
        }
    }
}
