//! Bugsnag integration for fieldlog
//!
//! Provides a `HookRegistrar` that validates a Bugsnag API key and a
//! `Reporter` that delivers `ERROR` and `PANIC` records to the Bugsnag
//! error-reporting API (payload version 5).
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use fieldlog_bugsnag::{BugsnagConfig, BugsnagRegistrar};
//! use fieldlog_logging::{LogFacade, LoggingConfig, StreamSink};
//!
//! let registrar = BugsnagRegistrar::new(BugsnagConfig::from_env());
//! let facade = LogFacade::init(
//!     &LoggingConfig::from_env(),
//!     Arc::new(StreamSink::stdout()),
//!     Some(&registrar),
//! );
//! facade.logger().error("payment provider unreachable");
//! ```

pub mod config;
pub mod payload;
pub mod reporter;

pub use config::BugsnagConfig;
pub use reporter::{validate_api_key, BugsnagRegistrar, BugsnagReporter};
