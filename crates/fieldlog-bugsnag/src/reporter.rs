//! Bugsnag reporter and hook registrar

use crate::config::BugsnagConfig;
use crate::payload;
use chrono::{SecondsFormat, Utc};
use fieldlog_core_types::schema::DIAGNOSTICS_TARGET;
use fieldlog_core_types::{LogRecord, ReportingKey};
use fieldlog_errors::{LogError, Result};
use fieldlog_logging::{HookRegistrar, Reporter};
use std::sync::Arc;

/// Length of a Bugsnag project API key
pub const API_KEY_LEN: usize = 32;

/// Check that a key looks like a Bugsnag project API key
///
/// # Errors
///
/// Returns `LogError::InvalidReportingKey` unless the key is 32 hexadecimal
/// characters.
pub fn validate_api_key(key: &ReportingKey) -> Result<()> {
    let raw = key.expose();
    if raw.len() != API_KEY_LEN {
        return Err(LogError::InvalidReportingKey {
            reason: format!("expected {API_KEY_LEN} characters, got {}", raw.len()),
        });
    }
    if !raw.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(LogError::InvalidReportingKey {
            reason: "key must be hexadecimal".to_string(),
        });
    }
    Ok(())
}

/// Delivers records to the Bugsnag notify endpoint
pub struct BugsnagReporter {
    client: reqwest::blocking::Client,
    key: ReportingKey,
    config: BugsnagConfig,
}

impl BugsnagReporter {
    /// Build a reporter for a validated key
    ///
    /// # Errors
    ///
    /// Returns `LogError::InvalidReportingKey` for a malformed key and
    /// `LogError::HookRegistration` if the HTTP client cannot be built.
    pub fn new(key: ReportingKey, config: BugsnagConfig) -> Result<Self> {
        validate_api_key(&key)?;
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| LogError::hook_registration(err.to_string()))?;
        Ok(Self {
            client,
            key,
            config,
        })
    }
}

impl Reporter for BugsnagReporter {
    fn notify(&self, record: &LogRecord) -> Result<()> {
        let body = payload::build(record, &self.config);
        let sent_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);

        let response = self
            .client
            .post(&self.config.endpoint)
            .header("Bugsnag-Api-Key", self.key.expose())
            .header("Bugsnag-Payload-Version", payload::PAYLOAD_VERSION)
            .header("Bugsnag-Sent-At", sent_at)
            .json(&body)
            .send()
            .map_err(|err| LogError::delivery(None, err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LogError::delivery(
                Some(status.as_u16()),
                status.canonical_reason().unwrap_or("unexpected status"),
            ));
        }
        tracing::trace!(target: DIAGNOSTICS_TARGET, status = status.as_u16(), "report delivered");
        Ok(())
    }
}

/// Registrar turning a `BUGSNAG_API_KEY` into a `BugsnagReporter`
#[derive(Debug, Clone, Default)]
pub struct BugsnagRegistrar {
    config: BugsnagConfig,
}

impl BugsnagRegistrar {
    pub fn new(config: BugsnagConfig) -> Self {
        Self { config }
    }
}

impl HookRegistrar for BugsnagRegistrar {
    fn register(&self, key: &ReportingKey) -> Result<Arc<dyn Reporter>> {
        let reporter = BugsnagReporter::new(key.clone(), self.config.clone())?;
        Ok(Arc::new(reporter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldlog_errors::LogErrorKind;

    fn key(raw: &str) -> ReportingKey {
        ReportingKey::non_empty(raw).unwrap()
    }

    #[test]
    fn test_valid_key() {
        assert!(validate_api_key(&key("0123456789abcdef0123456789ABCDEF")).is_ok());
    }

    #[test]
    fn test_short_key_is_rejected() {
        let err = validate_api_key(&key("abc123")).unwrap_err();
        assert_eq!(err.kind(), LogErrorKind::InvalidReportingKey);
        assert!(err.to_string().contains("expected 32 characters, got 6"));
    }

    #[test]
    fn test_non_hex_key_is_rejected() {
        let err = validate_api_key(&key("zzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzz")).unwrap_err();
        assert_eq!(err.kind(), LogErrorKind::InvalidReportingKey);
    }

    #[test]
    fn test_registrar_builds_reporter_without_network() {
        let registrar = BugsnagRegistrar::new(BugsnagConfig::default());
        assert!(registrar
            .register(&key("0123456789abcdef0123456789abcdef"))
            .is_ok());
    }

    #[test]
    fn test_registrar_rejects_malformed_key() {
        let registrar = BugsnagRegistrar::default();
        let err = registrar.register(&key("not-a-key")).err().unwrap();
        assert_eq!(err.code(), "ERR_INVALID_REPORTING_KEY");
    }
}
