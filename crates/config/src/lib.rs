//! Configuration loading, validation, and management for chalkmate.
//!
//! Loads configuration from `~/.chalkmate/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.chalkmate/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// API key for the completion backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Base URL of the OpenAI-compatible endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Model name sent with every request.
    #[serde(default = "default_model")]
    pub model: String,

    /// Default temperature for control calls (scoring, estimation, refinement).
    #[serde(default = "default_temperature")]
    pub default_temperature: f32,

    /// Temperature for persona reply generation. Higher for naturalness.
    #[serde(default = "default_reply_temperature")]
    pub reply_temperature: f32,

    /// Per-request timeout in seconds. Expiry is recovered like any other
    /// transport failure, never fatal.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// How many recent turns the context summary embeds into prompts.
    #[serde(default = "default_history_window")]
    pub history_window: usize,
}

fn default_model() -> String {
    "deepseek-chat".into()
}
fn default_temperature() -> f32 {
    0.7
}
fn default_reply_temperature() -> f32 {
    0.8
}
fn default_request_timeout_secs() -> u64 {
    120
}
fn default_history_window() -> usize {
    6
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &redact(&self.api_key))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("default_temperature", &self.default_temperature)
            .field("reply_temperature", &self.reply_temperature)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("history_window", &self.history_window)
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.chalkmate/config.toml).
    ///
    /// Environment variables take priority over the file:
    /// - `CHALKMATE_API_KEY`, then `OPENAI_API_KEY`
    /// - `CHALKMATE_BASE_URL`, then `OPENAI_BASE_URL`
    /// - `CHALKMATE_MODEL`, then `LLM_MODEL_NAME`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;

        if let Some(key) = std::env::var("CHALKMATE_API_KEY")
            .ok()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
        {
            config.api_key = Some(key);
        }

        if let Some(url) = std::env::var("CHALKMATE_BASE_URL")
            .ok()
            .or_else(|| std::env::var("OPENAI_BASE_URL").ok())
        {
            config.base_url = Some(url);
        }

        if let Some(model) = std::env::var("CHALKMATE_MODEL")
            .ok()
            .or_else(|| std::env::var("LLM_MODEL_NAME").ok())
        {
            config.model = model;
        }

        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".chalkmate")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=2.0).contains(&self.default_temperature)
            || !(0.0..=2.0).contains(&self.reply_temperature)
        {
            return Err(ConfigError::ValidationError(
                "temperatures must be between 0.0 and 2.0".into(),
            ));
        }

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "request_timeout_secs must be positive".into(),
            ));
        }

        if self.history_window == 0 {
            return Err(ConfigError::ValidationError(
                "history_window must be positive".into(),
            ));
        }

        Ok(())
    }

    /// Check if an API key is available (from config or environment).
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            model: default_model(),
            default_temperature: default_temperature(),
            reply_temperature: default_reply_temperature(),
            request_timeout_secs: default_request_timeout_secs(),
            history_window: default_history_window(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
