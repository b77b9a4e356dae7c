//! Configuration handling for the survey client

use crate::state::Language;
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default survey backend
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Environment variable overriding `api_base_url`
pub const API_BASE_URL_ENV: &str = "SURVEY_API_BASE_URL";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurveyConfig {
    /// Survey backend base URL
    pub api_base_url: String,
    /// Preferred survey language, saved when toggled
    pub language: Language,
    pub request_timeout_secs: u64,
}

impl Default for SurveyConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            language: Language::En,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl SurveyConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("org", "survey", "survey-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file, then apply the environment override
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };

        if let Ok(url) = std::env::var(API_BASE_URL_ENV) {
            config.apply_base_url_override(&url);
        }

        Ok(config)
    }

    /// Load from `path`; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            self.save_to(&path)?;
        }
        Ok(())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    fn apply_base_url_override(&mut self, url: &str) {
        let url = url.trim();
        if !url.is_empty() {
            self.api_base_url = url.to_string();
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("survey-tui-{}", uuid::Uuid::new_v4()))
            .join(name)
    }

    #[test]
    fn test_default_config() {
        let config = SurveyConfig::default();
        assert_eq!(config.api_base_url, "http://localhost:8000");
        assert_eq!(config.language, Language::En);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: SurveyConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, SurveyConfig::default());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        // Should ignore unknown fields
        let json = r#"{"language": "te", "unknown_field": "value"}"#;
        let parsed: SurveyConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.language, Language::Te);
        assert_eq!(parsed.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = temp_path("config.json");
        let config = SurveyConfig {
            api_base_url: "https://survey.example.org".into(),
            language: Language::Te,
            request_timeout_secs: 10,
        };

        config.save_to(&path).unwrap();
        let loaded = SurveyConfig::load_from(&path).unwrap();

        assert_eq!(loaded, config);
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let loaded = SurveyConfig::load_from(&temp_path("absent.json")).unwrap();
        assert_eq!(loaded, SurveyConfig::default());
    }

    #[test]
    fn test_base_url_override() {
        let mut config = SurveyConfig::default();
        config.apply_base_url_override("  ");
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        config.apply_base_url_override("http://10.0.0.2:9000");
        assert_eq!(config.api_base_url, "http://10.0.0.2:9000");
    }

    #[test]
    fn test_zero_timeout_clamped() {
        let config = SurveyConfig {
            request_timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.request_timeout(), Duration::from_secs(1));
    }
}
