//! Structured logging facade
//!
//! `fieldlog-logging` composes log records from accumulated fields, a
//! severity tag and caller metadata, and hands them to an injected sink:
//!
//! - Single initialization point via `LogFacade::init(config, sink, registrar)`
//! - Per-task `Logger` handles carrying their own field map
//! - Call-site macros (`info!`, `error!`, ...) tagging records with the
//!   calling function, file and line
//! - Plain `Logger` methods (`info`, `error`, ...) record file and line
//!   through `#[track_caller]` but leave `function` unset; use the macros
//!   when the function name matters
//! - Optional crash-reporting hook expressed as a sink decorator
//! - Test capture sinks and layers for deterministic assertions
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//! use fieldlog_logging::{LogFacade, LoggingConfig, StreamSink};
//!
//! let config = LoggingConfig::default();
//! let facade = LogFacade::init(&config, Arc::new(StreamSink::stderr()), None);
//!
//! let mut logger = facade.logger();
//! logger.insert("user", "alice");
//! logger.error("login failed");
//! ```

pub mod config;
pub mod facade;
pub mod hook;
pub mod logger;
pub mod macros;
pub mod sink;
pub mod stream_sink;
pub mod test_capture;
pub mod tracing_sink;

pub use config::LoggingConfig;
pub use facade::LogFacade;
pub use hook::{HookRegistrar, Reporter, ReportingSink};
pub use logger::Logger;
pub use sink::{OutputFormat, Sink, SinkSettings};
pub use stream_sink::StreamSink;
pub use tracing_sink::TracingSink;

pub use fieldlog_core_types::{CallSite, Fields, Level, LogRecord, ReportingKey, Severity};
pub use fieldlog_errors::{LogError, LogErrorKind, Result};
