//! Configuration file management for Confab.
//!
//! Supports reading client settings from `~/.config/confab/config.toml`,
//! with environment variable overrides (`CONFAB_BACKEND_URL`,
//! `CONFAB_MODEL`). A missing file is not an error; defaults apply.

use std::env;
use std::fs;
use std::path::PathBuf;

use confab_core::{ConfabError, Result};
use serde::Deserialize;

/// Backend base URL used when neither the config file nor the
/// environment specifies one.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Model identifier sent with summarize/ask requests by default.
pub const DEFAULT_MODEL: &str = "llama3-70b-8192";

/// Client configuration for the remote inference backend.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the backend, without a trailing slash requirement.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Model identifier forwarded to the backend, if any.
    #[serde(default = "default_model")]
    pub model: Option<String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_model() -> Option<String> {
    Some(DEFAULT_MODEL.to_string())
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
        }
    }
}

impl ClientConfig {
    /// Loads the configuration from `~/.config/confab/config.toml`,
    /// then applies environment variable overrides.
    ///
    /// A missing config file yields the defaults. A file that exists but
    /// cannot be read or parsed is a configuration error.
    pub fn load() -> Result<Self> {
        let mut config = match config_path() {
            Some(path) if path.exists() => {
                let content = fs::read_to_string(&path).map_err(|e| {
                    ConfabError::config(format!(
                        "Failed to read configuration file at {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                Self::from_toml_str(&content).map_err(|e| {
                    ConfabError::config(format!(
                        "Failed to parse configuration file at {}: {}",
                        path.display(),
                        e
                    ))
                })?
            }
            _ => Self::default(),
        };

        if let Ok(url) = env::var("CONFAB_BACKEND_URL") {
            if !url.trim().is_empty() {
                config.base_url = url;
            }
        }
        if let Ok(model) = env::var("CONFAB_MODEL") {
            if !model.trim().is_empty() {
                config.model = Some(model);
            }
        }

        Ok(config)
    }

    fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

/// Returns the path to the configuration file: ~/.config/confab/config.toml
fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("confab").join("config.toml"))
}
