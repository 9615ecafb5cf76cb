//! Bugsnag notifier settings

use fieldlog_core_types::schema::{
    ENV_BUGSNAG_APP_VERSION, ENV_BUGSNAG_NOTIFY_ENDPOINT, ENV_BUGSNAG_RELEASE_STAGE,
};
use std::time::Duration;

/// Default notify endpoint of the hosted service
pub const DEFAULT_NOTIFY_ENDPOINT: &str = "https://notify.bugsnag.com";

/// Default HTTP timeout for a single report
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BugsnagConfig {
    pub endpoint: String,
    pub release_stage: Option<String>,
    pub app_version: Option<String>,
    pub timeout: Duration,
}

impl Default for BugsnagConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_NOTIFY_ENDPOINT.to_string(),
            release_stage: None,
            app_version: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl BugsnagConfig {
    /// Read the optional `BUGSNAG_*` variables from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable lookup; empty values count as absent
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        Self {
            endpoint: non_empty(ENV_BUGSNAG_NOTIFY_ENDPOINT)
                .unwrap_or_else(|| DEFAULT_NOTIFY_ENDPOINT.to_string()),
            release_stage: non_empty(ENV_BUGSNAG_RELEASE_STAGE),
            app_version: non_empty(ENV_BUGSNAG_APP_VERSION),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_release_stage(mut self, stage: impl Into<String>) -> Self {
        self.release_stage = Some(stage.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
