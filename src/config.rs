//! Client configuration: hub URL and token resolution
//!
//! Values come from, in order: explicit arguments, the `BESZEL_URL` /
//! `BESZEL_TOKEN` environment variables, then the persisted config file at
//! `$XDG_CONFIG_HOME/beszel/config.json` (fallback `~/.config/beszel/config.json`).

use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

use crate::client::BeszelClient;
use crate::error::{BeszelError, BeszelResult};

pub const URL_ENV: &str = "BESZEL_URL";
pub const TOKEN_ENV: &str = "BESZEL_TOKEN";

/// Persisted credentials
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

pub fn config_dir() -> PathBuf {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
        PathBuf::from(xdg).join("beszel")
    } else {
        dirs_next::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("beszel")
    }
}

/// JSON file backing [`StoredConfig`]
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn default_location() -> Self {
        Self::at(config_dir().join("config.json"))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Missing file yields an empty config; a malformed one is an error
    pub fn load(&self) -> BeszelResult<StoredConfig> {
        match fs::read_to_string(&self.path) {
            Ok(s) => serde_json::from_str(&s).map_err(|e| {
                BeszelError::Config(format!("malformed config file {}: {}", self.path.display(), e))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(StoredConfig::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, config: &StoredConfig) -> BeszelResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(config)?;
        fs::write(&self.path, data)?;
        debug!("Saved config to {}", self.path.display());
        Ok(())
    }

    pub fn set_url(&self, url: &str) -> BeszelResult<()> {
        let mut config = self.load()?;
        config.url = Some(url.to_string());
        self.save(&config)
    }

    pub fn set_token(&self, token: &str) -> BeszelResult<()> {
        let mut config = self.load()?;
        config.token = Some(token.to_string());
        self.save(&config)
    }

    /// Forget URL and token
    pub fn clear(&self) -> BeszelResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Resolved connection settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub token: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl ClientConfig {
    /// Resolve from explicit values, the process environment and `stored`
    pub fn resolve(
        url: Option<String>,
        token: Option<String>,
        stored: &StoredConfig,
    ) -> BeszelResult<Self> {
        Self::resolve_with(url, token, stored, |key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::resolve`] with a custom environment lookup
    pub fn resolve_with<F>(
        url: Option<String>,
        token: Option<String>,
        stored: &StoredConfig,
        env: F,
    ) -> BeszelResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = non_empty(url)
            .or_else(|| non_empty(env(URL_ENV)))
            .or_else(|| non_empty(stored.url.clone()))
            .ok_or_else(|| {
                BeszelError::Config(format!(
                    "no Beszel URL configured; pass --url, set {} or run 'beszel login'",
                    URL_ENV
                ))
            })?;

        let token = non_empty(token)
            .or_else(|| non_empty(env(TOKEN_ENV)))
            .or_else(|| non_empty(stored.token.clone()));

        Ok(Self { base_url, token })
    }

    /// Open a client with these settings
    pub fn connect(&self) -> BeszelResult<BeszelClient> {
        BeszelClient::new(&self.base_url, self.token.clone())
    }
}
