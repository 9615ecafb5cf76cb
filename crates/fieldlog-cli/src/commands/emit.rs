//! Emit command
//!
//! Usage: fieldlog [--severity <SEVERITY>] [--field <KEY=VALUE>]... <MESSAGE>

use clap::{Args, ValueEnum};
use fieldlog_bugsnag::{BugsnagConfig, BugsnagRegistrar};
use fieldlog_logging::{Fields, LogFacade, LoggingConfig, Severity, StreamSink};
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SeverityArg {
    Debug,
    Info,
    Warning,
    Error,
    Panic,
}

impl From<SeverityArg> for Severity {
    fn from(arg: SeverityArg) -> Self {
        match arg {
            SeverityArg::Debug => Severity::Debug,
            SeverityArg::Info => Severity::Info,
            SeverityArg::Warning => Severity::Warning,
            SeverityArg::Error => Severity::Error,
            SeverityArg::Panic => Severity::Panic,
        }
    }
}

#[derive(Debug, Args)]
pub struct EmitArgs {
    /// Severity of the record
    #[arg(short, long, value_enum, default_value = "info")]
    pub severity: SeverityArg,

    /// Custom field as KEY=VALUE; VALUE is parsed as JSON when possible
    #[arg(short, long = "field", value_name = "KEY=VALUE")]
    pub fields: Vec<String>,

    /// Message to log
    pub message: String,
}

/// Parse `KEY=VALUE` pairs into a field map
pub fn parse_fields(pairs: &[String]) -> Result<Fields, String> {
    let mut fields = Fields::new();
    for pair in pairs {
        let (key, raw) = pair
            .split_once('=')
            .ok_or_else(|| format!("invalid field '{pair}': expected KEY=VALUE"))?;
        if key.is_empty() {
            return Err(format!("invalid field '{pair}': empty key"));
        }
        let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::from(raw));
        fields.insert(key.to_string(), value);
    }
    Ok(fields)
}

/// Execute emit command
pub fn execute(args: EmitArgs) -> Result<(), Box<dyn std::error::Error>> {
    let fields = parse_fields(&args.fields)?;

    let registrar = BugsnagRegistrar::new(BugsnagConfig::from_env());
    let facade = LogFacade::init(
        &LoggingConfig::from_env(),
        Arc::new(StreamSink::stdout()),
        Some(&registrar),
    );

    let mut logger = facade.with_fields(&fields);
    let severity: Severity = args.severity.into();
    match severity {
        Severity::Panic => logger.panic(&args.message),
        severity => logger.log(severity, &args.message),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_typed_and_string_values() {
        let fields = parse_fields(&[
            "count=3".to_string(),
            "ok=true".to_string(),
            "user=alice".to_string(),
            "tags=[\"a\",\"b\"]".to_string(),
            "expr=a=b".to_string(),
        ])
        .unwrap();

        assert_eq!(fields["count"], json!(3));
        assert_eq!(fields["ok"], json!(true));
        assert_eq!(fields["user"], json!("alice"));
        assert_eq!(fields["tags"], json!(["a", "b"]));
        assert_eq!(fields["expr"], json!("a=b"));
    }

    #[test]
    fn test_parse_rejects_missing_separator() {
        let err = parse_fields(&["novalue".to_string()]).unwrap_err();
        assert!(err.contains("expected KEY=VALUE"));
    }

    #[test]
    fn test_parse_rejects_empty_key() {
        assert!(parse_fields(&["=1".to_string()]).is_err());
    }
}
