//! Line-oriented sink writing to any `io::Write`
//!
//! JSON output uses the usual flat record shape: backend keys `level`, `msg`
//! and `time`, then every record field as a top-level key. A custom field
//! that collides with a backend key is written under `fields.<key>`.

use crate::sink::{OutputFormat, Sink, SinkSettings};
use chrono::{DateTime, SecondsFormat, Utc};
use fieldlog_core_types::schema::{CLASH_PREFIX, KEY_LEVEL, KEY_MSG, KEY_TIME};
use fieldlog_core_types::LogRecord;
use fieldlog_errors::Result;
use serde_json::{Map, Value};
use std::io::{self, Write};
use std::sync::Mutex;

struct StreamState<W> {
    writer: W,
    settings: SinkSettings,
}

/// Sink writing one formatted line per record
pub struct StreamSink<W: Write + Send> {
    state: Mutex<StreamState<W>>,
}

impl StreamSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl StreamSink<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write + Send> StreamSink<W> {
    /// Wrap a writer; the sink uses default settings until configured
    pub fn new(writer: W) -> Self {
        Self {
            state: Mutex::new(StreamState {
                writer,
                settings: SinkSettings::default(),
            }),
        }
    }

    /// Consume the sink and return the writer
    pub fn into_inner(self) -> W {
        match self.state.into_inner() {
            Ok(state) => state.writer,
            Err(poisoned) => poisoned.into_inner().writer,
        }
    }
}

impl<W: Write + Send> Sink for StreamSink<W> {
    fn configure(&self, settings: &SinkSettings) -> Result<()> {
        self.state
            .lock()
            .map(|mut state| state.settings = *settings)
            .ok();
        Ok(())
    }

    fn emit(&self, record: &LogRecord) {
        let Ok(mut state) = self.state.lock() else {
            return;
        };
        if !record.severity.is_enabled(state.settings.min_level) {
            return;
        }

        let now = Utc::now();
        let line = match state.settings.format {
            OutputFormat::Json => match format_json(record, now) {
                Ok(line) => line,
                Err(_) => return,
            },
            OutputFormat::Text => format_text(record, now),
        };
        writeln!(state.writer, "{line}").ok();
        state.writer.flush().ok();
    }
}

fn backend_key(key: &str) -> String {
    if key == KEY_LEVEL || key == KEY_MSG || key == KEY_TIME {
        format!("{CLASH_PREFIX}{key}")
    } else {
        key.to_string()
    }
}

fn timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Serialize a record as a single JSON object
///
/// # Errors
///
/// Returns `LogError::Serialization` if a field value cannot be encoded.
pub fn format_json(record: &LogRecord, now: DateTime<Utc>) -> Result<String> {
    let mut object = Map::new();
    for (key, value) in &record.fields {
        object.insert(backend_key(key), value.clone());
    }
    object.insert(
        KEY_LEVEL.to_string(),
        Value::from(record.severity.backend_name()),
    );
    object.insert(KEY_MSG.to_string(), Value::from(record.message.as_str()));
    object.insert(KEY_TIME.to_string(), Value::from(timestamp(now)));

    Ok(serde_json::to_string(&Value::Object(object))?)
}

/// Render a record as a `key=value` line
pub fn format_text(record: &LogRecord, now: DateTime<Utc>) -> String {
    let mut line = format!(
        "{KEY_TIME}={} {KEY_LEVEL}={} {KEY_MSG}={}",
        timestamp(now),
        record.severity.backend_name(),
        quote(&record.message)
    );
    for (key, value) in &record.fields {
        let rendered = match value {
            Value::String(s) => quote(s),
            other => other.to_string(),
        };
        line.push_str(&format!(" {}={rendered}", backend_key(key)));
    }
    line
}

fn quote(value: &str) -> String {
    let needs_quoting = value.is_empty()
        || value
            .chars()
            .any(|c| c.is_whitespace() || c == '"' || c == '=' || c.is_control());
    if needs_quoting {
        Value::from(value).to_string()
    } else {
        value.to_string()
    }
}
