//! Configuration System
//!
//! Layered configuration for timeouts, route discovery, the CF CLI home and logging.
//! Defaults are overridden by the user config file, then an explicit file named in
//! `WILLITCONNECT_CONFIG`, then `WILLITCONNECT__*` environment variables.

use crate::client::HttpTimeouts;
use crate::logging::LoggingConfig;
use crate::service::Discovery;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

mod facade;
mod merge_policy;
mod sources;

pub use facade::ConfigLoader;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WillItConnectConfig {
    #[serde(default)]
    pub service: ServiceConfig,

    #[serde(default)]
    pub platform: PlatformConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Connectivity-service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Whole-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// TCP/TLS connect timeout in seconds
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Pin route discovery; unset follows the argument syntax in use
    #[serde(default)]
    pub discovery: Option<Discovery>,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            discovery: None,
        }
    }
}

impl ServiceConfig {
    pub fn timeouts(&self) -> HttpTimeouts {
        HttpTimeouts {
            connect: Duration::from_secs(self.connect_timeout_secs),
            request: Duration::from_secs(self.timeout_secs),
        }
    }
}

/// Platform (CF CLI) settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlatformConfig {
    /// Directory containing `.cf/config.json`; defaults to `$CF_HOME`, then `$HOME`
    #[serde(default)]
    pub cf_home: Option<PathBuf>,
}

/// Configuration validation errors
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("Service: {0}")]
    Service(String),
    #[error("Logging: {0}")]
    Logging(String),
}

impl WillItConnectConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.service.timeout_secs == 0 {
            errors.push(ValidationError::Service(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.service.connect_timeout_secs == 0 {
            errors.push(ValidationError::Service(
                "connect_timeout_secs must be greater than zero".to_string(),
            ));
        }
        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
