//! Test capture for deterministic logging assertions
//!
//! - `CaptureSink` keeps composed records in memory and honours the
//!   configured threshold like a real sink.
//! - `CaptureReporter` records what a reporting hook was asked to deliver
//!   and can be told to fail.
//! - `CaptureLayer` collects tracing events, for asserting `TracingSink`
//!   output under `tracing::subscriber::with_default`.

use crate::hook::{HookRegistrar, Reporter};
use crate::sink::{Sink, SinkSettings};
use fieldlog_core_types::{LogRecord, ReportingKey, Severity};
use fieldlog_errors::{LogError, Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::field::{Field, Visit};
use tracing::{Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

#[derive(Default)]
struct CaptureState {
    records: Vec<LogRecord>,
    settings: Option<SinkSettings>,
    fatal_count: usize,
}

/// In-memory sink
///
/// Clones share the same buffer, so a test can hand one clone to the facade
/// and keep another for assertions. Until configured, every record is kept.
#[derive(Clone, Default)]
pub struct CaptureSink {
    state: Arc<Mutex<CaptureState>>,
}

impl CaptureSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all captured records
    pub fn records(&self) -> Vec<LogRecord> {
        self.state
            .lock()
            .map(|state| state.records.clone())
            .unwrap_or_default()
    }

    /// Get the most recent record
    pub fn last(&self) -> Option<LogRecord> {
        self.records().pop()
    }

    /// Settings received through `configure`, if any
    pub fn settings(&self) -> Option<SinkSettings> {
        self.state.lock().ok().and_then(|state| state.settings)
    }

    /// Number of fatal raises observed
    pub fn fatal_count(&self) -> usize {
        self.state.lock().map(|state| state.fatal_count).unwrap_or(0)
    }

    /// Assert that a record exists with the given severity and message
    ///
    /// # Panics
    ///
    /// Panics if no such record was captured
    pub fn assert_record_exists(&self, severity: Severity, message: &str) {
        let records = self.records();
        let found = records
            .iter()
            .any(|r| r.severity == severity && r.message == message);
        assert!(
            found,
            "Expected record severity={} msg={:?} not found in {} captured records",
            severity,
            message,
            records.len()
        );
    }

    /// Clear all captured records
    pub fn clear(&self) {
        self.state
            .lock()
            .map(|mut state| state.records.clear())
            .ok();
    }
}

impl Sink for CaptureSink {
    fn configure(&self, settings: &SinkSettings) -> Result<()> {
        self.state
            .lock()
            .map(|mut state| state.settings = Some(*settings))
            .ok();
        Ok(())
    }

    fn emit(&self, record: &LogRecord) {
        self.state
            .lock()
            .map(|mut state| {
                let enabled = state
                    .settings
                    .map_or(true, |settings| record.severity.is_enabled(settings.min_level));
                if enabled {
                    state.records.push(record.clone());
                }
            })
            .ok();
    }

    fn raise_fatal(&self, record: &LogRecord) -> ! {
        self.emit(record);
        self.state
            .lock()
            .map(|mut state| state.fatal_count += 1)
            .ok();
        panic!("{}", record.message);
    }
}

/// In-memory reporter
#[derive(Clone, Default)]
pub struct CaptureReporter {
    reported: Arc<Mutex<Vec<LogRecord>>>,
    failure: Option<LogError>,
}

impl CaptureReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reporter whose every delivery fails with `err`
    pub fn failing(err: LogError) -> Self {
        Self {
            reported: Arc::default(),
            failure: Some(err),
        }
    }

    /// Records the hook was asked to deliver, including failed attempts
    pub fn reported(&self) -> Vec<LogRecord> {
        self.reported
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

impl Reporter for CaptureReporter {
    fn notify(&self, record: &LogRecord) -> Result<()> {
        self.reported
            .lock()
            .map(|mut r| r.push(record.clone()))
            .ok();
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

/// Registrar handing out a fixed reporter, or a fixed registration error
#[derive(Clone)]
pub struct CaptureRegistrar {
    outcome: std::result::Result<CaptureReporter, LogError>,
    keys: Arc<Mutex<Vec<String>>>,
}

impl CaptureRegistrar {
    pub fn accepting(reporter: CaptureReporter) -> Self {
        Self {
            outcome: Ok(reporter),
            keys: Arc::default(),
        }
    }

    pub fn rejecting(err: LogError) -> Self {
        Self {
            outcome: Err(err),
            keys: Arc::default(),
        }
    }

    /// Keys passed to `register`, exposed for assertions
    pub fn registered_keys(&self) -> Vec<String> {
        self.keys.lock().map(|k| k.clone()).unwrap_or_default()
    }
}

impl HookRegistrar for CaptureRegistrar {
    fn register(&self, key: &ReportingKey) -> Result<Arc<dyn Reporter>> {
        self.keys
            .lock()
            .map(|mut k| k.push(key.expose().to_string()))
            .ok();
        match &self.outcome {
            Ok(reporter) => Ok(Arc::new(reporter.clone())),
            Err(err) => Err(err.clone()),
        }
    }
}

/// A captured tracing event with all its fields
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: Level,
    pub target: String,
    pub message: Option<String>,
    pub fields: HashMap<String, String>,
}

struct FieldVisitor {
    fields: HashMap<String, String>,
}

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.fields
            .insert(field.name().to_string(), format!("{:?}", value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.fields
            .insert(field.name().to_string(), value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.fields
            .insert(field.name().to_string(), value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.fields
            .insert(field.name().to_string(), value.to_string());
    }
}

/// Layer collecting tracing events
#[derive(Clone, Default)]
pub struct CaptureLayer {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl CaptureLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all captured events
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Events produced under `target`
    pub fn events_for(&self, target: &str) -> Vec<CapturedEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.target == target)
            .collect()
    }
}

impl<S> Layer<S> for CaptureLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let mut visitor = FieldVisitor {
            fields: HashMap::new(),
        };
        event.record(&mut visitor);

        let captured = CapturedEvent {
            level: *metadata.level(),
            target: metadata.target().to_string(),
            message: visitor.fields.remove("message"),
            fields: visitor.fields,
        };

        self.events
            .lock()
            .map(|mut events| events.push(captured))
            .ok();
    }
}
