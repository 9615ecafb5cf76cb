//! Crash-reporting hook
//!
//! Reporting is a sink decorator: `ReportingSink` forwards every record to
//! the wrapped sink and additionally hands `ERROR` and `PANIC` records to a
//! `Reporter`. This crate knows no reporting backend; integrations provide
//! a `HookRegistrar` that turns a `ReportingKey` into a `Reporter`.

use crate::sink::{Sink, SinkSettings};
use fieldlog_core_types::schema::DIAGNOSTICS_TARGET;
use fieldlog_core_types::{LogRecord, ReportingKey};
use fieldlog_errors::Result;
use std::sync::Arc;

/// Delivers a record to an external crash-reporting service
pub trait Reporter: Send + Sync {
    /// # Errors
    ///
    /// Returns `LogError::Delivery` or `LogError::Serialization` when the
    /// report could not be sent. The caller absorbs the error.
    fn notify(&self, record: &LogRecord) -> Result<()>;
}

/// Builds a reporter for a configured credential
pub trait HookRegistrar {
    /// # Errors
    ///
    /// Returns `LogError::InvalidReportingKey` or `LogError::HookRegistration`
    /// when the hook cannot be set up. Initialization treats this as fatal.
    fn register(&self, key: &ReportingKey) -> Result<Arc<dyn Reporter>>;
}

/// Sink decorator forwarding reportable records to a `Reporter`
pub struct ReportingSink {
    inner: Arc<dyn Sink>,
    reporter: Arc<dyn Reporter>,
}

impl ReportingSink {
    pub fn new(inner: Arc<dyn Sink>, reporter: Arc<dyn Reporter>) -> Self {
        Self { inner, reporter }
    }

    fn report(&self, record: &LogRecord) {
        if !record.severity.is_reportable() {
            return;
        }
        if let Err(err) = self.reporter.notify(record) {
            tracing::warn!(
                target: DIAGNOSTICS_TARGET,
                err_code = err.code(),
                error = %err,
                "failed to forward record to reporting service"
            );
        }
    }
}

impl Sink for ReportingSink {
    fn configure(&self, settings: &SinkSettings) -> Result<()> {
        self.inner.configure(settings)
    }

    fn emit(&self, record: &LogRecord) {
        self.inner.emit(record);
        self.report(record);
    }

    fn raise_fatal(&self, record: &LogRecord) -> ! {
        self.report(record);
        self.inner.raise_fatal(record)
    }
}
