//! Core types shared across fieldlog crates
//!
//! This crate provides the vocabulary used by the facade, its sinks and
//! the reporting integrations:
//!
//! - **Severity types**: `Level` (filter threshold) and `Severity` (record tag)
//! - **Records**: `Fields`, `LogRecord`, `CallSite`
//! - **Credentials**: `ReportingKey`, redacted in Debug and Display
//! - **Schema constants**: reserved field keys and environment variable names

pub mod record;
pub mod schema;
pub mod secret;
pub mod severity;

pub use record::{CallSite, Fields, LogRecord};
pub use secret::ReportingKey;
pub use severity::{Level, Severity};
