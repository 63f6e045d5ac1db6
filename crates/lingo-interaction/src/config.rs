//! Configuration file management for Lingo.
//!
//! Supports reading secrets from `~/.config/lingo/secret.json`, with
//! environment variables as a fallback.

use lingo_core::{LingoError, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Default model used when none is configured.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// Root configuration structure for secret.json
#[derive(Debug, Clone, Deserialize)]
pub struct SecretConfig {
    pub api_key: String,
    #[serde(default)]
    pub model_name: Option<String>,
}

/// Resolved API credentials for the hosted-LLM transforms.
#[derive(Debug, Clone)]
pub struct ApiCredentials {
    pub api_key: String,
    pub model: String,
}

impl ApiCredentials {
    /// Loads credentials with the usual priority:
    ///
    /// 1. `~/.config/lingo/secret.json`
    /// 2. Environment variables (`LINGO_API_KEY`, `LINGO_MODEL_NAME`)
    ///
    /// # Errors
    ///
    /// Returns [`LingoError::Config`] if no API key can be found in
    /// either location.
    pub fn load() -> Result<Self> {
        if let Ok(secret) = load_secret_config() {
            return Ok(Self {
                api_key: secret.api_key,
                model: secret.model_name.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            });
        }

        let api_key = env::var("LINGO_API_KEY").map_err(|_| {
            LingoError::config(
                "LINGO_API_KEY not found in ~/.config/lingo/secret.json or environment variables",
            )
        })?;
        let model = env::var("LINGO_MODEL_NAME").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Ok(Self { api_key, model })
    }
}

/// Loads the secret configuration file from ~/.config/lingo/secret.json
pub fn load_secret_config() -> Result<SecretConfig> {
    let config_path = get_config_path()?;

    if !config_path.exists() {
        return Err(LingoError::config(format!(
            "Configuration file not found at: {}",
            config_path.display()
        )));
    }

    let content = fs::read_to_string(&config_path).map_err(|e| {
        LingoError::config(format!(
            "Failed to read configuration file at {}: {}",
            config_path.display(),
            e
        ))
    })?;

    serde_json::from_str(&content).map_err(|e| {
        LingoError::config(format!(
            "Failed to parse configuration file at {}: {}",
            config_path.display(),
            e
        ))
    })
}

/// Returns the path to the configuration file: ~/.config/lingo/secret.json
fn get_config_path() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| LingoError::config("Could not determine home directory"))?;
    Ok(home.join(".config").join("lingo").join("secret.json"))
}
