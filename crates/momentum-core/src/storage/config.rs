//! TOML-based application configuration.
//!
//! Stores user preferences:
//! - Notification behavior for the overdue watcher
//! - Deadline polling cadence
//! - Suggestion engine settings (remote endpoint, connectivity flag)
//! - Identity service endpoint
//!
//! Configuration is stored at `~/.config/momentum/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::ConfigError;

/// Notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_volume")]
    pub volume: u32,
}

/// Deadline polling configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollConfig {
    /// Seconds between deadline checks in watch mode.
    #[serde(default = "default_poll_interval")]
    pub interval_secs: u64,
}

/// Suggestion engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionsConfig {
    /// OpenAI-compatible API base URL.
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// API key. Remote suggestions are disabled without one.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    /// Connectivity flag. When true, the remote suggester is never consulted.
    #[serde(default)]
    pub offline: bool,
}

impl SuggestionsConfig {
    /// Whether the remote suggester may be used at all.
    pub fn remote_available(&self) -> bool {
        self.api_key.is_some() && !self.offline
    }
}

/// Identity service configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Identity service base URL (e.g. "https://xyz.example.co").
    #[serde(default)]
    pub base_url: Option<String>,
    /// Public API key sent with every request.
    #[serde(default)]
    pub anon_key: Option<String>,
}

impl AuthConfig {
    /// The service counts as configured only with an https endpoint and a
    /// key present.
    pub fn is_configured(&self) -> bool {
        matches!(&self.base_url, Some(url) if url.starts_with("https://"))
            && self.anon_key.is_some()
    }
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/momentum/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub notifications: NotificationsConfig,
    #[serde(default)]
    pub poll: PollConfig,
    #[serde(default)]
    pub suggestions: SuggestionsConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

// Default functions
fn default_true() -> bool {
    true
}
fn default_volume() -> u32 {
    50
}
fn default_poll_interval() -> u64 {
    60
}
fn default_api_base() -> String {
    "https://api.openai.com/v1".into()
}
fn default_model() -> String {
    "gpt-3.5-turbo".into()
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            volume: default_volume(),
        }
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_poll_interval(),
        }
    }
}

impl Default for SuggestionsConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            api_key: None,
            model: default_model(),
            offline: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            notifications: NotificationsConfig::default(),
            poll: PollConfig::default(),
            suggestions: SuggestionsConfig::default(),
            auth: AuthConfig::default(),
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()
            .map_err(|e| ConfigError::LoadFailed {
                path: PathBuf::from("~/.config"),
                message: e.to_string(),
            })?
            .join("config.toml"))
    }

    /// Load from disk; a missing file writes and returns the defaults.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be parsed, or if the
    /// default config cannot be written.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path,
                message: e.to_string(),
            }),
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Load from disk, returning defaults on any error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Persist to disk.
    ///
    /// # Errors
    /// Returns an error if the config cannot be serialized or written.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let mut current = &json;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        match current {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key and persist the result.
    ///
    /// # Errors
    /// Returns an error if the key is unknown, the value cannot be coerced
    /// into the key's type, or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        set_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        self.save()
    }
}

fn set_by_path(root: &mut serde_json::Value, key: &str, value: &str) -> Result<(), ConfigError> {
    let mut parts = key.split('.').peekable();
    if parts.peek().is_none() {
        return Err(ConfigError::UnknownKey(key.to_string()));
    }

    let mut current = root;
    while let Some(part) = parts.next() {
        let obj = current
            .as_object_mut()
            .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        let slot = obj
            .get_mut(part)
            .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

        if parts.peek().is_none() {
            *slot = coerce_like(slot, key, value)?;
            return Ok(());
        }
        current = slot;
    }

    Err(ConfigError::UnknownKey(key.to_string()))
}

/// Coerce `value` into the JSON type currently held at the key. Null slots
/// (unset optional strings) accept a plain string.
fn coerce_like(
    existing: &serde_json::Value,
    key: &str,
    value: &str,
) -> Result<serde_json::Value, ConfigError> {
    use serde_json::Value;

    match existing {
        Value::Bool(_) => value
            .parse::<bool>()
            .map(Value::Bool)
            .map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                message: format!("cannot parse '{value}' as bool"),
            }),
        Value::Number(_) => {
            if let Ok(n) = value.parse::<u64>() {
                Ok(Value::Number(n.into()))
            } else if let Some(n) = value.parse::<f64>().ok().and_then(serde_json::Number::from_f64)
            {
                Ok(Value::Number(n))
            } else {
                Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: format!("cannot parse '{value}' as number"),
                })
            }
        }
        _ => Ok(Value::String(value.to_string())),
    }
}
