//! Reporting credential
//!
//! `ReportingKey` holds the crash-reporting API key. It never prints its
//! value through Debug or Display, so a config dump or an init error
//! cannot leak it into the logs it configures.

use std::fmt;

const REDACTED: &str = "***REDACTED***";

/// API key of an external crash-reporting service
#[derive(Clone, PartialEq, Eq)]
pub struct ReportingKey(String);

impl ReportingKey {
    /// Wrap a key, treating an empty value as absent
    ///
    /// # Example
    ///
    /// ```
    /// use fieldlog_core_types::ReportingKey;
    ///
    /// assert!(ReportingKey::non_empty("").is_none());
    ///
    /// let key = ReportingKey::non_empty("0123456789abcdef0123456789abcdef").unwrap();
    /// assert_eq!(format!("{key:?}"), "***REDACTED***");
    /// ```
    pub fn non_empty(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.is_empty() {
            None
        } else {
            Some(Self(value))
        }
    }

    /// Expose the raw key
    ///
    /// Only reporter implementations should call this, to authenticate.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ReportingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl fmt::Display for ReportingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_key_is_absent() {
        assert!(ReportingKey::non_empty("").is_none());
    }

    #[test]
    fn test_whitespace_key_is_kept() {
        let key = ReportingKey::non_empty("   ").unwrap();
        assert_eq!(key.expose(), "   ");
    }

    #[test]
    fn test_key_is_redacted() {
        let key = ReportingKey::non_empty("super-secret").unwrap();
        assert_eq!(format!("{key}"), REDACTED);
        assert!(!format!("{key:?}").contains("super-secret"));
        assert_eq!(key.expose(), "super-secret");
    }

    #[test]
    fn test_redacted_inside_struct_debug() {
        #[derive(Debug)]
        #[allow(dead_code)]
        struct Config {
            stage: &'static str,
            key: ReportingKey,
        }

        let config = Config {
            stage: "production",
            key: ReportingKey::non_empty("abc123").unwrap(),
        };
        let debug = format!("{config:?}");
        assert!(debug.contains("production"));
        assert!(!debug.contains("abc123"));
    }
}
