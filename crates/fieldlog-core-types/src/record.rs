//! Log record model
//!
//! A record is a message, a severity tag and a flat map of fields. The map
//! is ordered so serialized output is deterministic.

use crate::schema::{FIELD_FILE, FIELD_FUNCTION, FIELD_ROW, FIELD_SEVERITY};
use crate::severity::Severity;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::panic::Location;

/// Custom data attached to a record
pub type Fields = BTreeMap<String, Value>;

/// Location of the code that invoked the facade
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallSite {
    pub function: Option<String>,
    pub file: String,
    pub row: u32,
}

impl CallSite {
    /// Explicitly tagged call site
    pub fn new(function: impl Into<String>, file: impl Into<String>, row: u32) -> Self {
        Self {
            function: Some(function.into()),
            file: file.into(),
            row,
        }
    }

    /// Call site from a `#[track_caller]` location (no function name)
    pub fn from_location(location: &Location<'_>) -> Self {
        Self {
            function: None,
            file: location.file().to_string(),
            row: location.line(),
        }
    }

    /// Write `function`, `file` and `row` into a field map
    ///
    /// `function` is only written when known.
    pub fn write_into(&self, fields: &mut Fields) {
        if let Some(function) = &self.function {
            fields.insert(FIELD_FUNCTION.to_string(), Value::from(function.as_str()));
        }
        fields.insert(FIELD_FILE.to_string(), Value::from(self.file.as_str()));
        fields.insert(FIELD_ROW.to_string(), Value::from(self.row));
    }
}

/// A fully composed log record, as handed to a sink
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogRecord {
    pub severity: Severity,
    pub message: String,
    pub fields: Fields,
}

impl LogRecord {
    pub fn new(severity: Severity, message: impl Into<String>, fields: Fields) -> Self {
        Self {
            severity,
            message: message.into(),
            fields,
        }
    }

    /// Look up a field value
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Look up a string field value
    pub fn field_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    /// The `severity` field as stored in the map
    pub fn severity_field(&self) -> Option<&str> {
        self.field_str(FIELD_SEVERITY)
    }

    /// Caller metadata carried by the record, if complete enough to locate it
    pub fn call_site(&self) -> Option<CallSite> {
        let file = self.field_str(FIELD_FILE)?;
        let row = self.fields.get(FIELD_ROW).and_then(Value::as_u64)?;
        Some(CallSite {
            function: self.field_str(FIELD_FUNCTION).map(str::to_string),
            file: file.to_string(),
            row: u32::try_from(row).ok()?,
        })
    }

    /// Custom fields only, without the facade's reserved keys
    pub fn custom_fields(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields
            .iter()
            .filter(|(key, _)| !crate::schema::is_reserved(key))
    }
}
