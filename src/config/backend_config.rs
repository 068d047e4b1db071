//! Backend configuration parsing from environment variables.
//!
//! - `BACKEND_URL`: base address of the prediction service
//! - `API_KEY`: optional access key sent as `x-api-key`
//! - `BACKEND_TIMEOUT_SECS`: per-request timeout

use anyhow::{Context, Result};
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// Prediction service settings
#[derive(Clone, PartialEq, Eq)]
pub struct BackendEnvConfig {
    /// Trailing `/` removed; `None` when unset or blank
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl Default for BackendEnvConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl BackendEnvConfig {
    pub fn new(base_url: &str, api_key: Option<&str>) -> Self {
        Self {
            base_url: non_blank(base_url).map(|url| url.trim_end_matches('/').to_string()),
            api_key: api_key.and_then(non_blank).map(str::to_string),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load from an arbitrary variable source
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let timeout_secs = match lookup("BACKEND_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("Invalid BACKEND_TIMEOUT_SECS: {}", raw))?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            anyhow::bail!("BACKEND_TIMEOUT_SECS must be greater than zero");
        }

        let base_url = lookup("BACKEND_URL").unwrap_or_default();
        let api_key = lookup("API_KEY");

        Ok(Self::new(&base_url, api_key.as_deref())
            .with_timeout(Duration::from_secs(timeout_secs)))
    }

    pub fn is_configured(&self) -> bool {
        self.base_url.is_some()
    }
}

// Manual impl so the access key never reaches a log line
impl std::fmt::Debug for BackendEnvConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendEnvConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
