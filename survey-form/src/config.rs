//! Deployment configuration for the form.
//!
//! Loaded from an optional TOML file by the host:
//!
//! ```toml
//! endpoint = "https://example.com/collect"
//! timeout_ms = 10000
//! transport = "opaque"   # or "readable"
//! notice_ms = 3000
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Collection endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8080/collect";

/// How the submission client interprets what comes back from the endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportPolicy {
    /// The reply cannot be read. A dispatched request counts as success.
    #[default]
    Opaque,

    /// The reply is parsed and only `{ "success": true }` counts as success.
    Readable,
}

/// Error type for loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// URL the record is POSTed to.
    pub endpoint: String,

    /// Caller-side timeout for the single send, in milliseconds.
    pub timeout_ms: u64,

    pub transport: TransportPolicy,

    /// How long an error notice stays visible, in milliseconds.
    pub notice_ms: u64,

    /// Label shown on the submit control while a request is in flight.
    pub submitting_label: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_ms: 10_000,
            transport: TransportPolicy::default(),
            notice_ms: 3_000,
            submitting_label: "Submitting...".to_string(),
        }
    }
}

impl FormConfig {
    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoint.trim().is_empty() {
            return Err(ConfigError::Invalid("endpoint must not be empty".into()));
        }
        if self.timeout_ms == 0 {
            return Err(ConfigError::Invalid("timeout_ms must be positive".into()));
        }
        Ok(())
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Sub-millisecond parts round up; the timeout never drops to zero.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = ceil_millis(timeout).max(1);
        self
    }

    pub fn with_transport(mut self, transport: TransportPolicy) -> Self {
        self.transport = transport;
        self
    }

    pub fn with_notice_duration(mut self, duration: Duration) -> Self {
        self.notice_ms = ceil_millis(duration);
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn notice_duration(&self) -> Duration {
        Duration::from_millis(self.notice_ms)
    }
}

fn ceil_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_nanos().div_ceil(1_000_000)).unwrap_or(u64::MAX)
}
