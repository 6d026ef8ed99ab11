//! Service endpoint configuration.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default endpoint of the hosted comparison service.
const DEFAULT_SERVICE_URL: &str = "https://plagrism-backend-1.onrender.com";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the comparison service.
    #[serde(default = "default_service_url")]
    pub service_url: String,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_service_url() -> String {
    DEFAULT_SERVICE_URL.to_string()
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_request_timeout_secs() -> u64 {
    60
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_url: default_service_url(),
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Config {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    load_config_from_str(&content)
}

pub fn load_config_from_str(content: &str) -> Result<Config, ConfigError> {
    let config: Config = serde_json::from_str(content)?;

    validate_config(&config)?;

    Ok(config)
}

fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if reqwest::Url::parse(&config.service_url).is_err() {
        return Err(ConfigError::Validation {
            message: format!("service_url '{}' is not a valid URL", config.service_url),
        });
    }

    if config.connect_timeout_secs == 0 {
        return Err(ConfigError::Validation {
            message: "connect_timeout_secs must be greater than zero".to_string(),
        });
    }

    if config.request_timeout_secs == 0 {
        return Err(ConfigError::Validation {
            message: "request_timeout_secs must be greater than zero".to_string(),
        });
    }

    Ok(())
}
