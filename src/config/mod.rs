//! Configuration management for todo-fetch.
//!
//! Configuration is read from the `"todo-fetch"` key of a JSON settings
//! document, merged with defaults, validated, and kept in a process-wide
//! singleton that the executor falls back to when no explicit config is given.

pub mod schema;

pub use schema::{FetchConfig, MAX_REDIRECT_LIMIT};

use once_cell::sync::Lazy;
use serde_json::Value;
use std::path::Path;
use std::sync::RwLock;

/// Key under which settings are looked up.
pub const SETTINGS_KEY: &str = "todo-fetch";

/// Global configuration instance.
static CONFIG: Lazy<RwLock<FetchConfig>> = Lazy::new(|| RwLock::new(FetchConfig::default()));

/// Loads configuration from a JSON settings value.
///
/// Settings that fail to deserialize are logged and replaced by defaults.
/// The result is validated and, on success, becomes the global configuration.
///
/// # Example
///
/// ```no_run
/// use todo_fetch::config::load_config;
/// use serde_json::json;
///
/// let settings = json!({
///     "todo-fetch": {
///         "timeout": 60000,
///         "concurrentRequests": true
///     }
/// });
///
/// let config = load_config(Some(settings)).unwrap();
/// assert_eq!(config.timeout, 60000);
/// ```
pub fn load_config(settings_json: Option<Value>) -> Result<FetchConfig, String> {
    let mut config = FetchConfig::default();

    if let Some(settings) = settings_json {
        if let Some(section) = settings.get(SETTINGS_KEY) {
            match serde_json::from_value::<FetchConfig>(section.clone()) {
                Ok(user_config) => config = user_config,
                Err(e) => {
                    log::warn!(
                        "Failed to parse {} settings: {}. Using defaults.",
                        SETTINGS_KEY,
                        e
                    );
                }
            }
        }
    }

    config
        .validate()
        .map_err(|e| format!("Invalid configuration: {}", e))?;

    if let Ok(mut global_config) = CONFIG.write() {
        *global_config = config.clone();
    }

    log::debug!("Loaded configuration: {:?}", config);
    Ok(config)
}

/// Reads a JSON settings file and loads it with [`load_config`].
pub fn load_config_file(path: impl AsRef<Path>) -> Result<FetchConfig, String> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    let settings: Value = serde_json::from_str(&content)
        .map_err(|e| format!("Failed to parse {}: {}", path.display(), e))?;
    load_config(Some(settings))
}

/// Gets a clone of the current global configuration.
///
/// Returns the defaults if nothing has been loaded yet.
pub fn get_config() -> FetchConfig {
    CONFIG
        .read()
        .map(|c| c.clone())
        .unwrap_or_else(|_| FetchConfig::default())
}

/// Applies `updater` to the global configuration.
///
/// If the updated configuration no longer validates it is reset to defaults.
pub fn update_config<F>(updater: F)
where
    F: FnOnce(&mut FetchConfig),
{
    if let Ok(mut config) = CONFIG.write() {
        updater(&mut config);

        if let Err(e) = config.validate() {
            log::warn!("Configuration validation failed after update: {}", e);
            *config = FetchConfig::default();
        }
    }
}

/// Resets the global configuration to defaults.
pub fn reset_config() {
    if let Ok(mut config) = CONFIG.write() {
        *config = FetchConfig::default();
    }
}
