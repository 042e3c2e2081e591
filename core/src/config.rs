//! Vehicle service configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::VehicleError;

/// Public test endpoint used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://test.tspb.su/test-task";

/// Environment variable holding the service base URL.
pub const URL_ENV: &str = "VEHICLES_API_URL";

/// Environment variable holding the per-request timeout in seconds.
pub const TIMEOUT_ENV: &str = "VEHICLES_API_TIMEOUT_SECS";

/// Connection settings for the inventory service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleConfig {
    /// Base URL the `/vehicles` resource lives under (default: public test
    /// endpoint)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds (default: 5)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

const fn default_timeout_secs() -> u64 {
    5
}

impl Default for VehicleConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl VehicleConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Read `VEHICLES_API_URL` and `VEHICLES_API_TIMEOUT_SECS`, falling back
    /// to the defaults for unset variables.
    pub fn from_env() -> Result<Self, VehicleError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, VehicleError> {
        let mut config = Self::default();
        if let Some(url) = lookup(URL_ENV).filter(|url| !url.trim().is_empty()) {
            config.base_url = url;
        }
        if let Some(raw) = lookup(TIMEOUT_ENV) {
            config.timeout_secs = parse_timeout_secs(&raw)
                .map_err(|e| VehicleError::Config(format!("{TIMEOUT_ENV}: {e}")))?;
        }
        Ok(config)
    }
}

/// Parse a per-request timeout in whole seconds. Zero is rejected: the agent
/// would fail every request immediately.
pub fn parse_timeout_secs(raw: &str) -> Result<u64, String> {
    match raw.trim().parse::<u64>() {
        Ok(0) => Err("timeout must be greater than zero".to_string()),
        Ok(secs) => Ok(secs),
        Err(e) => Err(format!("{raw:?} is not a number of seconds: {e}")),
    }
}
