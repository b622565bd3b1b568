//! HTTP request execution configuration.
//!
//! The subset of [`FetchConfig`] that shapes the underlying HTTP client.

use crate::config::{get_config, FetchConfig};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Parameters used to build the HTTP client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionConfig {
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,

    pub follow_redirects: bool,

    pub max_redirects: u32,

    pub validate_ssl: bool,

    pub user_agent: String,
}

impl ExecutionConfig {
    /// Creates a config with the given timeout and global defaults for the rest.
    pub fn new(timeout_ms: u64) -> Self {
        Self {
            timeout_ms,
            ..Self::from_global_config()
        }
    }

    /// Returns the timeout as a `Duration`.
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Creates an ExecutionConfig from the global configuration.
    pub fn from_global_config() -> Self {
        Self::from(&get_config())
    }
}

impl From<&FetchConfig> for ExecutionConfig {
    fn from(config: &FetchConfig) -> Self {
        Self {
            timeout_ms: config.timeout,
            follow_redirects: config.follow_redirects,
            max_redirects: config.max_redirects,
            validate_ssl: config.validate_ssl,
            user_agent: config.user_agent.clone(),
        }
    }
}

impl Default for ExecutionConfig {
    /// Reads settings from the global [`FetchConfig`].
    fn default() -> Self {
        Self::from_global_config()
    }
}
