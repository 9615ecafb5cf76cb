//! Facade initialization
//!
//! `LogFacade` is the one-time setup step performed by the host. It
//! configures the sink, optionally wraps it in a reporting hook, and hands
//! out `Logger` handles.

use crate::config::LoggingConfig;
use crate::hook::{HookRegistrar, ReportingSink};
use crate::logger::Logger;
use crate::sink::Sink;
use fieldlog_core_types::schema::DIAGNOSTICS_TARGET;
use fieldlog_core_types::Fields;
use fieldlog_errors::{LogError, Result};
use std::sync::Arc;

/// Configured logging facade
#[derive(Clone)]
pub struct LogFacade {
    sink: Arc<dyn Sink>,
    capture_caller: bool,
    tag_messages: bool,
    reporting: bool,
}

impl LogFacade {
    /// Initialize the facade, returning any setup failure
    ///
    /// The sink is configured first. If a reporting key is configured, the
    /// registrar builds a reporter and the sink is wrapped in a
    /// `ReportingSink`. A key without a registrar is an error: a configured
    /// hook is never dropped silently.
    ///
    /// # Errors
    ///
    /// - `LogError::BackendConfiguration` if the sink rejects its settings
    /// - `LogError::HookUnavailable` if a key is set but `registrar` is `None`
    /// - any error returned by the registrar
    pub fn try_init(
        config: &LoggingConfig,
        sink: Arc<dyn Sink>,
        registrar: Option<&dyn HookRegistrar>,
    ) -> Result<Self> {
        sink.configure(&config.sink_settings())?;

        let (sink, reporting) = match &config.reporting_key {
            None => (sink, false),
            Some(key) => {
                let registrar = registrar.ok_or(LogError::HookUnavailable)?;
                let reporter = registrar.register(key)?;
                tracing::debug!(target: DIAGNOSTICS_TARGET, "reporting hook registered");
                let decorated: Arc<dyn Sink> = Arc::new(ReportingSink::new(sink, reporter));
                (decorated, true)
            }
        };

        Ok(Self {
            sink,
            capture_caller: config.capture_caller,
            tag_messages: config.tag_messages,
            reporting,
        })
    }

    /// Initialize the facade, panicking on any setup failure
    ///
    /// A misconfigured crash-reporting integration cannot be recovered from
    /// at startup, so the host process is expected to stop here.
    ///
    /// # Panics
    ///
    /// Panics with the error code and message if `try_init` fails.
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    /// use fieldlog_logging::{LogFacade, LoggingConfig, StreamSink};
    ///
    /// let facade = LogFacade::init(&LoggingConfig::default(), Arc::new(StreamSink::stderr()), None);
    /// assert!(!facade.has_reporting_hook());
    /// ```
    pub fn init(
        config: &LoggingConfig,
        sink: Arc<dyn Sink>,
        registrar: Option<&dyn HookRegistrar>,
    ) -> Self {
        match Self::try_init(config, sink, registrar) {
            Ok(facade) => facade,
            Err(err) => panic!("fieldlog initialization failed [{}]: {err}", err.code()),
        }
    }

    /// New handle with an empty field map
    pub fn logger(&self) -> Logger {
        self.with_fields(&Fields::new())
    }

    /// New handle seeded with a copy of `fields`
    pub fn with_fields(&self, fields: &Fields) -> Logger {
        Logger::new(
            Arc::clone(&self.sink),
            fields.clone(),
            self.capture_caller,
            self.tag_messages,
        )
    }

    /// Whether records are also forwarded to a reporting service
    pub fn has_reporting_hook(&self) -> bool {
        self.reporting
    }
}
