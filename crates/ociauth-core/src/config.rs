//! Configuration for the OCI login backend.
//!
//! All configuration is driven by environment variables. Values that fail to
//! parse keep their defaults.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;
use typed_builder::TypedBuilder;

use crate::error::{OciAuthError, OciAuthResult};

/// Backend-wide configuration.
///
/// # Examples
///
/// ```
/// use ociauth_core::OciAuthConfig;
///
/// let config = OciAuthConfig::builder().identity_timeout_ms(5_000).build();
/// assert_eq!(config.identity_timeout().as_secs(), 5);
/// assert_eq!(config.log_level, "info");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct OciAuthConfig {
    /// Log level filter string (e.g. `"info"`, `"debug"`).
    #[builder(default = String::from("info"))]
    pub log_level: String,

    /// Upper bound, in milliseconds, for a single identity provider call.
    #[builder(default = 30_000)]
    pub identity_timeout_ms: u64,
}

impl Default for OciAuthConfig {
    fn default() -> Self {
        Self {
            log_level: String::from("info"),
            identity_timeout_ms: 30_000,
        }
    }
}

impl OciAuthConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `OCI_AUTH_LOG_LEVEL` | `info` |
    /// | `OCI_AUTH_IDENTITY_TIMEOUT_MS` | `30000` |
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(v) = std::env::var("OCI_AUTH_LOG_LEVEL") {
            config.log_level = v;
        }
        if let Ok(v) = std::env::var("OCI_AUTH_IDENTITY_TIMEOUT_MS") {
            match v.parse::<u64>() {
                Ok(n) => config.identity_timeout_ms = n,
                Err(_) => warn!(value = %v, "ignoring invalid OCI_AUTH_IDENTITY_TIMEOUT_MS"),
            }
        }

        config
    }

    /// Check the configuration for values the backend cannot run with.
    ///
    /// # Errors
    /// Returns [`OciAuthError::Config`] when the identity timeout is zero.
    pub fn validate(&self) -> OciAuthResult<()> {
        if self.identity_timeout_ms == 0 {
            return Err(OciAuthError::Config(
                "identity timeout must be greater than zero".to_owned(),
            ));
        }
        Ok(())
    }

    /// Identity call timeout as a [`Duration`].
    #[must_use]
    pub fn identity_timeout(&self) -> Duration {
        Duration::from_millis(self.identity_timeout_ms)
    }
}
