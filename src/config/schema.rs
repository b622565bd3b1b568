//! Configuration schema for todo-fetch.
//!
//! Defines the configuration structure and the validation rules for every
//! user-configurable setting.

use serde::{Deserialize, Serialize};

/// Upper bound accepted for `maxRedirects`.
pub const MAX_REDIRECT_LIMIT: u32 = 50;

/// Main configuration structure.
///
/// Read from the `"todo-fetch"` key of a JSON settings document. Missing
/// settings fall back to the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchConfig {
    /// Base path each identifier is appended to.
    ///
    /// Concatenation is literal, so the base normally ends with `/`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in milliseconds.
    ///
    /// Covers connect, headers and body download. Must be greater than 0.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Whether to follow 3xx redirects.
    #[serde(default = "default_follow_redirects")]
    pub follow_redirects: bool,

    /// Maximum number of redirects to follow when `follow_redirects` is set.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: u32,

    /// Whether to validate TLS certificates.
    #[serde(default = "default_validate_ssl")]
    pub validate_ssl: bool,

    /// Value sent in the User-Agent header.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Issue both requests of a pair at once instead of one after the other.
    #[serde(default)]
    pub concurrent_requests: bool,

    /// Treat non-2xx responses as errors instead of decoding their bodies.
    #[serde(default)]
    pub error_for_status: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
            follow_redirects: default_follow_redirects(),
            max_redirects: default_max_redirects(),
            validate_ssl: default_validate_ssl(),
            user_agent: default_user_agent(),
            concurrent_requests: false,
            error_for_status: false,
        }
    }
}

impl FetchConfig {
    /// Validates the configuration.
    ///
    /// # Returns
    ///
    /// `Ok(())` if all settings are valid, or `Err` with a descriptive message.
    pub fn validate(&self) -> Result<(), String> {
        let parsed = url::Url::parse(&self.base_url)
            .map_err(|e| format!("baseUrl is not a valid URL: {}", e))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(format!(
                "baseUrl must use http or https, got: {}",
                parsed.scheme()
            ));
        }

        if self.timeout == 0 {
            return Err("timeout must be greater than 0".to_string());
        }

        if self.max_redirects > MAX_REDIRECT_LIMIT {
            return Err(format!(
                "maxRedirects must be at most {}",
                MAX_REDIRECT_LIMIT
            ));
        }

        if self.user_agent.trim().is_empty() {
            return Err("userAgent must not be empty".to_string());
        }

        Ok(())
    }

    /// Returns the timeout as a `std::time::Duration`.
    pub fn timeout_duration(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout)
    }
}

fn default_base_url() -> String {
    "https://jsonplaceholder.typicode.com/todos/".to_string()
}

fn default_timeout() -> u64 {
    30000 // 30 seconds in milliseconds
}

fn default_follow_redirects() -> bool {
    true
}

fn default_max_redirects() -> u32 {
    10
}

fn default_validate_ssl() -> bool {
    true
}

fn default_user_agent() -> String {
    format!("todo-fetch/{}", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FetchConfig::default();
        assert_eq!(
            config.base_url,
            "https://jsonplaceholder.typicode.com/todos/"
        );
        assert_eq!(config.timeout, 30000);
        assert!(config.follow_redirects);
        assert_eq!(config.max_redirects, 10);
        assert!(config.validate_ssl);
        assert!(config.user_agent.starts_with("todo-fetch/"));
        assert!(!config.concurrent_requests);
        assert!(!config.error_for_status);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_zero_timeout() {
        let config = FetchConfig {
            timeout: 0,
            ..Default::default()
        };
        assert_eq!(
            config.validate().unwrap_err(),
            "timeout must be greater than 0"
        );
    }

    #[test]
    fn test_validation_bad_base_url() {
        let config = FetchConfig {
            base_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(config.validate().unwrap_err().contains("baseUrl"));

        let config = FetchConfig {
            base_url: "ftp://example.com/todos/".to_string(),
            ..Default::default()
        };
        assert!(config.validate().unwrap_err().contains("ftp"));
    }

    #[test]
    fn test_validation_redirect_limit() {
        let config = FetchConfig {
            max_redirects: 0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());

        let config = FetchConfig {
            max_redirects: MAX_REDIRECT_LIMIT + 1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_empty_user_agent() {
        let config = FetchConfig {
            user_agent: "  ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_deserialization_with_defaults() {
        let json = r#"{
            "timeout": 5000,
            "concurrentRequests": true
        }"#;

        let config: FetchConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.timeout, 5000);
        assert!(config.concurrent_requests);
        assert!(config.follow_redirects);
        assert_eq!(config.base_url, default_base_url());
    }

    #[test]
    fn test_timeout_duration() {
        let config = FetchConfig {
            timeout: 1500,
            ..Default::default()
        };
        assert_eq!(
            config.timeout_duration(),
            std::time::Duration::from_millis(1500)
        );
    }
}
