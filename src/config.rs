use crate::constants::{
    API_KEY_ENV, DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_PATH, DEFAULT_PLACES_BASE_URL,
};
use crate::error::{CollectorError, Result};
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Settings for one collection run
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub api_key: String,
    pub force_refresh: bool,
    pub places_base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            api_key: String::new(),
            force_refresh: false,
            places_base_url: DEFAULT_PLACES_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    collector: CollectorSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct CollectorSection {
    input_path: Option<PathBuf>,
    output_path: Option<PathBuf>,
    api_key: Option<String>,
    force_refresh: Option<bool>,
    places_base_url: Option<String>,
}

impl Config {
    /// Load settings from a TOML file, falling back to defaults for anything it
    /// does not set. A missing file is only an error when `required` is true.
    pub fn load(path: &Path, required: bool) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound && !required => return Ok(Self::default()),
            Err(e) => {
                return Err(CollectorError::Config(format!(
                    "Failed to read config file '{}': {}",
                    path.display(),
                    e
                )))
            }
        };
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(content)?;
        let section = file.collector;
        let defaults = Self::default();
        Ok(Self {
            input_path: section.input_path.unwrap_or(defaults.input_path),
            output_path: section.output_path.unwrap_or(defaults.output_path),
            api_key: section.api_key.unwrap_or(defaults.api_key),
            force_refresh: section.force_refresh.unwrap_or(defaults.force_refresh),
            places_base_url: section.places_base_url.unwrap_or(defaults.places_base_url),
        })
    }

    /// Let the environment supply the credential. Call `dotenv` first to pick
    /// up a `.env` file.
    pub fn apply_env(&mut self) {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                self.api_key = key;
            }
        }
    }

    /// Fail before any lookup when no credential has been supplied.
    pub fn require_api_key(&self) -> Result<&str> {
        let key = self.api_key.trim();
        if key.is_empty() {
            return Err(CollectorError::Config(format!(
                "No places API key configured; set {} or `api_key` in the config file",
                API_KEY_ENV
            )));
        }
        Ok(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.input_path, PathBuf::from("vilniaus_stoteles.csv"));
        assert_eq!(config.output_path, PathBuf::from("bus_station_ratings.csv"));
        assert!(config.api_key.is_empty());
        assert!(!config.force_refresh);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
            [collector]
            output_path = "out/ratings.csv"
            force_refresh = true
            "#,
        )
        .unwrap();

        assert_eq!(config.output_path, PathBuf::from("out/ratings.csv"));
        assert!(config.force_refresh);
        assert_eq!(config.input_path, PathBuf::from("vilniaus_stoteles.csv"));
        assert_eq!(config.places_base_url, DEFAULT_PLACES_BASE_URL);
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let result = Config::from_toml_str("[collector]\nretries = 3\n");
        assert!(matches!(result, Err(CollectorError::Toml(_))));
    }

    #[test]
    fn test_missing_optional_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(&dir.path().join("config.toml"), false).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_missing_required_file_is_error() {
        let dir = TempDir::new().unwrap();
        let result = Config::load(&dir.path().join("config.toml"), true);
        assert!(matches!(result, Err(CollectorError::Config(_))));
    }

    #[test]
    fn test_require_api_key() {
        let mut config = Config::default();
        assert!(config.require_api_key().is_err());

        config.api_key = "  ".to_string();
        assert!(config.require_api_key().is_err());

        config.api_key = "secret".to_string();
        assert_eq!(config.require_api_key().unwrap(), "secret");
    }
}
