//! Configuration management
//!
//! Settings live in `settings.json` inside the app directory:
//! ```json
//! {
//!   "api": { "baseUrl": "http://172.20.10.3:8000/", "timeoutSecs": null }
//! }
//! ```
//! Keys this crate does not manage are preserved on save.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::adapters::http::normalize_base_url;
use crate::domain::result::{Error, Result};

/// Base URL used when nothing is configured
pub const DEFAULT_BASE_URL: &str = "http://172.20.10.3:8000/";

/// Environment variable overriding the configured base URL
pub const BASE_URL_ENV: &str = "EXPENSE_TRACKER_BASE_URL";

const SETTINGS_FILE: &str = "settings.json";

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    api: ApiSettings,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiSettings {
    #[serde(default)]
    base_url: Option<String>,
    #[serde(default)]
    timeout_secs: Option<u64>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

/// Connection settings for the Expense Tracker API
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiConfig {
    pub base_url: String,
    /// `None` keeps the HTTP library's default
    pub timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
        }
    }
}

/// Client configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub api: ApiConfig,
}

impl Config {
    /// Load config from the app directory
    ///
    /// The base URL can be overridden with `EXPENSE_TRACKER_BASE_URL`.
    /// A missing settings file yields the defaults; an unreadable one is an
    /// error.
    pub fn load(app_dir: &Path) -> Result<Self> {
        let env_url = std::env::var(BASE_URL_ENV).ok().filter(|v| !v.trim().is_empty());
        Self::load_with_override(app_dir, env_url.as_deref())
    }

    /// Load only what is saved in settings.json, ignoring the environment
    ///
    /// Used before `save` so an environment override is never persisted.
    pub fn load_saved(app_dir: &Path) -> Result<Self> {
        Self::load_with_override(app_dir, None)
    }

    fn load_with_override(app_dir: &Path, base_url_override: Option<&str>) -> Result<Self> {
        let raw = read_settings(app_dir)?;

        let base_url = base_url_override
            .map(str::to_string)
            .or(raw.api.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let base_url = normalize_base_url(&base_url)?.to_string();

        Ok(Self {
            api: ApiConfig {
                base_url,
                timeout_secs: raw.api.timeout_secs,
            },
        })
    }

    /// Save config to the app directory, keeping keys we don't manage
    pub fn save(&self, app_dir: &Path) -> Result<()> {
        std::fs::create_dir_all(app_dir)?;

        let mut settings = read_settings(app_dir)?;
        settings.api.base_url = Some(self.api.base_url.clone());
        settings.api.timeout_secs = self.api.timeout_secs;

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(app_dir.join(SETTINGS_FILE), content)?;
        Ok(())
    }

    /// Validate and set the API base URL
    pub fn set_base_url(&mut self, url: &str) -> Result<()> {
        self.api.base_url = normalize_base_url(url)?.to_string();
        Ok(())
    }
}

fn read_settings(app_dir: &Path) -> Result<SettingsFile> {
    let path = app_dir.join(SETTINGS_FILE);
    if !path.exists() {
        return Ok(SettingsFile::default());
    }

    let content = std::fs::read_to_string(&path)?;
    serde_json::from_str(&content)
        .map_err(|e| Error::config(format!("Invalid {}: {}", path.display(), e)))
}
