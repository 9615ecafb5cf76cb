//! Bugsnag error-reporting payload (version 5)
//!
//! Each `LogRecord` becomes one event with a single exception. The
//! exception class is the record's severity name, the stack trace holds the
//! call site when the record carries one, and every field is attached under
//! `metaData.fields`.

use crate::config::BugsnagConfig;
use fieldlog_core_types::{Fields, LogRecord, Severity};
use serde::Serialize;

pub const PAYLOAD_VERSION: &str = "5";

const NOTIFIER_NAME: &str = "fieldlog";
const NOTIFIER_URL: &str = "https://github.com/fieldlog/fieldlog";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Payload {
    pub payload_version: &'static str,
    pub notifier: Notifier,
    pub events: Vec<Event>,
}

#[derive(Debug, Serialize)]
pub struct Notifier {
    pub name: &'static str,
    pub version: &'static str,
    pub url: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub exceptions: Vec<Exception>,
    pub severity: &'static str,
    pub severity_reason: SeverityReason,
    pub unhandled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    pub app: App,
    #[serde(rename = "metaData")]
    pub meta_data: MetaData,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Exception {
    pub error_class: String,
    pub message: String,
    pub stacktrace: Vec<StackFrame>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StackFrame {
    pub file: String,
    pub line_number: u32,
    pub method: String,
    pub in_project: bool,
}

#[derive(Debug, Serialize)]
pub struct SeverityReason {
    #[serde(rename = "type")]
    pub kind: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct App {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_stage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MetaData {
    pub fields: Fields,
}

/// Build the payload for a single record
pub fn build(record: &LogRecord, config: &BugsnagConfig) -> Payload {
    let site = record.call_site();
    let context = site.as_ref().and_then(|s| s.function.clone());
    let stacktrace = site
        .map(|s| StackFrame {
            method: s.function.unwrap_or_default(),
            file: s.file,
            line_number: s.row,
            in_project: true,
        })
        .into_iter()
        .collect();

    let unhandled = record.severity == Severity::Panic;
    let event = Event {
        exceptions: vec![Exception {
            error_class: record.severity.as_str().to_string(),
            message: record.message.clone(),
            stacktrace,
        }],
        severity: "error",
        severity_reason: SeverityReason {
            kind: if unhandled { "unhandledPanic" } else { "log" },
        },
        unhandled,
        context,
        app: App {
            release_stage: config.release_stage.clone(),
            version: config.app_version.clone(),
        },
        meta_data: MetaData {
            fields: record.fields.clone(),
        },
    };

    Payload {
        payload_version: PAYLOAD_VERSION,
        notifier: Notifier {
            name: NOTIFIER_NAME,
            version: env!("CARGO_PKG_VERSION"),
            url: NOTIFIER_URL,
        },
        events: vec![event],
    }
}
