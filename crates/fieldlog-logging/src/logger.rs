//! Logger handle
//!
//! A `Logger` owns an accumulated field map. Every emission writes the
//! reserved keys into that map in place, then forwards an owned snapshot to
//! the sink, so later changes to the handle never reach an emitted record.
//!
//! Reserved keys always win: `severity`, `function`, `file` and `row` are
//! recomputed on every emission, whatever the caller stored under them.

use crate::sink::Sink;
use fieldlog_core_types::schema::{CALLER_FIELDS, FIELD_SEVERITY};
use fieldlog_core_types::{CallSite, Fields, LogRecord, Severity};
use serde_json::Value;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

/// Per-task logging handle
///
/// Emission takes `&mut self`; a handle is not meant to be shared between
/// threads. Clone it, or ask the facade for a new one, per task.
#[derive(Clone)]
pub struct Logger {
    fields: Fields,
    sink: Arc<dyn Sink>,
    capture_caller: bool,
    tag_messages: bool,
}

impl Logger {
    pub(crate) fn new(
        sink: Arc<dyn Sink>,
        fields: Fields,
        capture_caller: bool,
        tag_messages: bool,
    ) -> Self {
        Self {
            fields,
            sink,
            capture_caller,
            tag_messages,
        }
    }

    /// Accumulated fields, including reserved keys from the last emission
    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Add or overwrite a custom field
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    #[track_caller]
    pub fn debug(&mut self, message: impl AsRef<str>) {
        self.log(Severity::Debug, message);
    }

    #[track_caller]
    pub fn info(&mut self, message: impl AsRef<str>) {
        self.log(Severity::Info, message);
    }

    #[track_caller]
    pub fn warning(&mut self, message: impl AsRef<str>) {
        self.log(Severity::Warning, message);
    }

    #[track_caller]
    pub fn error(&mut self, message: impl AsRef<str>) {
        self.log(Severity::Error, message);
    }

    /// Record a `PANIC` entry, then let the sink raise a fatal panic
    #[track_caller]
    pub fn panic(&mut self, message: impl AsRef<str>) -> ! {
        let site = CallSite::from_location(Location::caller());
        self.panic_at(site, message)
    }

    /// Emit at any severity, locating the caller through `#[track_caller]`
    ///
    /// The compiler provides file and line; the function name is not
    /// available this way and stays unset. Use the `info!`-style macros to
    /// record it.
    #[track_caller]
    pub fn log(&mut self, severity: Severity, message: impl AsRef<str>) {
        let site = CallSite::from_location(Location::caller());
        self.log_at(severity, site, message);
    }

    /// Emit with an explicitly tagged call site
    pub fn log_at(&mut self, severity: Severity, site: CallSite, message: impl AsRef<str>) {
        if severity == Severity::Panic {
            self.panic_at(site, message);
        }
        let record = self.compose(severity, site, message.as_ref());
        self.sink.emit(&record);
    }

    /// Terminal emission with an explicitly tagged call site
    pub fn panic_at(&mut self, site: CallSite, message: impl AsRef<str>) -> ! {
        let record = self.compose(Severity::Panic, site, message.as_ref());
        self.sink.raise_fatal(&record)
    }

    fn compose(&mut self, severity: Severity, site: CallSite, message: &str) -> LogRecord {
        self.fields.insert(
            FIELD_SEVERITY.to_string(),
            Value::from(severity.as_str()),
        );
        for key in CALLER_FIELDS {
            self.fields.remove(key);
        }
        if self.capture_caller {
            site.write_into(&mut self.fields);
        }

        let message = if self.tag_messages {
            format!("[{}] {message}", severity.as_str())
        } else {
            message.to_string()
        };
        LogRecord::new(severity, message, self.fields.clone())
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("fields", &self.fields)
            .field("capture_caller", &self.capture_caller)
            .field("tag_messages", &self.tag_messages)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_capture::CaptureSink;
    use fieldlog_core_types::schema::{FIELD_FILE, FIELD_FUNCTION, FIELD_ROW};
    use serde_json::json;

    fn logger_with(capture: &CaptureSink, capture_caller: bool, tag_messages: bool) -> Logger {
        Logger::new(
            Arc::new(capture.clone()),
            Fields::new(),
            capture_caller,
            tag_messages,
        )
    }

    #[test]
    fn test_emission_sets_severity_in_place() {
        let capture = CaptureSink::new();
        let mut logger = logger_with(&capture, true, false);

        logger.warning("low disk");

        assert_eq!(logger.fields().get(FIELD_SEVERITY), Some(&json!("WARNING")));
        let record = capture.last().unwrap();
        assert_eq!(record.severity, Severity::Warning);
        assert_eq!(record.severity_field(), Some("WARNING"));
    }

    #[test]
    fn test_track_caller_points_at_this_file() {
        let capture = CaptureSink::new();
        let mut logger = logger_with(&capture, true, false);

        let line = line!() + 1;
        logger.info("here");

        let record = capture.last().unwrap();
        assert!(record.field_str(FIELD_FILE).unwrap().ends_with("logger.rs"));
        assert_eq!(record.field(FIELD_ROW), Some(&json!(line)));
        assert!(record.field(FIELD_FUNCTION).is_none());
    }

    #[test]
    fn test_stale_function_is_cleared() {
        let capture = CaptureSink::new();
        let mut logger = logger_with(&capture, true, false);

        logger.log_at(Severity::Info, CallSite::new("a::b", "src/b.rs", 3), "tagged");
        logger.info("untagged");

        let records = capture.records();
        assert_eq!(records[0].field_str(FIELD_FUNCTION), Some("a::b"));
        assert!(records[1].field(FIELD_FUNCTION).is_none());
    }

    #[test]
    fn test_capture_disabled_strips_caller_keys() {
        let capture = CaptureSink::new();
        let mut logger = logger_with(&capture, false, false);
        logger.insert(FIELD_FILE, "forged.rs");

        logger.error("x");

        let record = capture.last().unwrap();
        for key in CALLER_FIELDS {
            assert!(record.field(key).is_none(), "{key} should be absent");
        }
    }

    #[test]
    fn test_tagged_messages() {
        let capture = CaptureSink::new();
        let mut logger = logger_with(&capture, false, true);

        logger.error("disk full");

        assert_eq!(capture.last().unwrap().message, "[ERROR] disk full");
    }

    #[test]
    fn test_log_at_panic_is_terminal() {
        let capture = CaptureSink::new();
        let mut logger = logger_with(&capture, true, false);

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            logger.log_at(Severity::Panic, CallSite::new("a", "a.rs", 1), "boom");
        }));

        assert!(result.is_err());
        assert_eq!(capture.last().unwrap().severity, Severity::Panic);
    }
}
