use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

pub const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com/v1";
pub const DEFAULT_LOCATION: &str = "50.45,30.52";
pub const DEFAULT_DAYS: u8 = 3;
pub const DEFAULT_LOADING_DELAY_MS: u64 = 500;

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// location = "50.45,30.52"
/// days = 3
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// WeatherAPI.com credential. Required before any fetch can succeed.
    pub api_key: Option<String>,

    /// Location query as a `"lat,lon"` string.
    pub location: String,

    /// Number of forecast days to request.
    pub days: u8,

    /// API base URL; overridable mainly for tests.
    pub base_url: String,

    /// Minimum time the loading state stays visible, in milliseconds.
    /// Purely a display affordance; set to 0 to disable.
    pub loading_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            location: DEFAULT_LOCATION.to_string(),
            days: DEFAULT_DAYS,
            base_url: DEFAULT_BASE_URL.to_string(),
            loading_delay_ms: DEFAULT_LOADING_DELAY_MS,
        }
    }
}

impl Config {
    /// Return the configured API key, or an actionable error when missing.
    pub fn api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            anyhow!(
                "No API key configured.\n\
                 Hint: run `forecast configure` and enter your WeatherAPI.com key."
            )
        })
    }

    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "forecast-app", "forecast-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_fixed_request() {
        let cfg = Config::default();

        assert_eq!(cfg.days, 3);
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.loading_delay_ms, 500);
        assert!(cfg.api_key.is_none());
    }

    #[test]
    fn api_key_errors_when_not_set() {
        let cfg = Config::default();
        let err = cfg.api_key().unwrap_err();

        assert!(err.to_string().contains("No API key configured"));
        assert!(err.to_string().contains("Hint: run `forecast configure`"));
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let cfg: Config = toml::from_str(r#"api_key = "KEY""#).expect("valid toml");

        assert_eq!(cfg.api_key.as_deref(), Some("KEY"));
        assert_eq!(cfg.location, DEFAULT_LOCATION);
        assert_eq!(cfg.days, 3);
    }

    #[test]
    fn toml_roundtrip_preserves_all_fields() {
        let cfg = Config {
            api_key: Some("KEY".into()),
            location: "48.85,2.35".into(),
            days: 3,
            base_url: "http://localhost:8080/v1".into(),
            loading_delay_ms: 0,
        };

        let text = toml::to_string_pretty(&cfg).expect("serialize");
        let back: Config = toml::from_str(&text).expect("parse");

        assert_eq!(back.api_key, cfg.api_key);
        assert_eq!(back.location, cfg.location);
        assert_eq!(back.base_url, cfg.base_url);
        assert_eq!(back.loading_delay_ms, 0);
    }
}
