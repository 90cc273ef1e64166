use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::derived::HourSlots;

/// Environment variable holding the WeatherAPI.com key.
pub const API_KEY_ENV: &str = "WEATHER_API_KEY";

/// Environment variable overriding the provider base URL.
pub const BASE_URL_ENV: &str = "WEATHER_API_BASE_URL";

pub const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com";

/// Top-level configuration.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// base_url = "https://api.weatherapi.com"
///
/// [hours]
/// dawn = 3
/// morning = 9
/// afternoon = 15
/// night = 21
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Upstream API key. A missing key is not an error here; the provider
    /// rejects the request and the view shows its error state.
    pub api_key: Option<String>,

    pub base_url: String,

    /// Which hours represent dawn, morning, afternoon and night.
    pub hours: HourSlots,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            hours: HourSlots::default(),
        }
    }
}

impl Config {
    /// Load config from disk (if present) and apply environment overrides.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        let mut cfg = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;

            Self::from_toml_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        } else {
            Self::default()
        };

        cfg.apply_overrides(|name| std::env::var(name).ok());
        cfg.validate()?;

        Ok(cfg)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(contents)?;
        Ok(cfg)
    }

    /// Override fields from variables returned by `lookup`; blank values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_blank(API_KEY_ENV) {
            self.api_key = Some(key);
        }
        if let Some(url) = non_blank(BASE_URL_ENV) {
            self.base_url = url;
        }
    }

    /// Hour indices must address a 24-entry day.
    pub fn validate(&self) -> Result<()> {
        let max = self.hours.max_index();
        if max > 23 {
            return Err(anyhow!("Configured hour index {max} is outside 0..=23"));
        }
        Ok(())
    }

    /// Key to send upstream; empty when none is configured.
    pub fn api_key_or_empty(&self) -> &str {
        self.api_key.as_deref().unwrap_or_default()
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "cityweather", "cityweather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
