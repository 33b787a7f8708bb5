use serde::Deserialize;
use std::{env, fs, path::Path};

use crate::error::AppError;

pub const DEFAULT_API_URL: &str = "https://forkify-api.herokuapp.com/api/v2/recipes";

/// Environment variable that overrides the `api_key` config field.
pub const API_KEY_ENV: &str = "LADLE_API_KEY";

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub api_url: String,
    pub api_key: String,
    /// Abort budget for every API call, in seconds.
    pub timeout_secs: u64,
    /// Results shown per search page. Used both for slicing and for the
    /// page count; there is deliberately no second hard-coded width.
    pub page_size: usize,
    pub bookmarks_path: String,
    /// How long the upload form stays open after a success/error message.
    pub modal_close_secs: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: String::new(),
            timeout_secs: 10,
            page_size: 10,
            bookmarks_path: "bookmarks.json".to_string(),
            modal_close_secs: 2.5,
        }
    }
}

impl AppConfig {
    /// Loads the TOML config file, falling back to defaults when the file
    /// does not exist. `LADLE_API_KEY` always wins over the file value.
    pub fn load(path: &str) -> Result<Self, AppError> {
        let config_path = Path::new(path);
        let mut config = if config_path.exists() {
            let raw = fs::read_to_string(config_path).map_err(|e| {
                AppError::Config(format!("failed to read config file '{path}': {e}"))
            })?;
            toml::from_str(&raw).map_err(|e| {
                AppError::Config(format!("failed to parse config file '{path}': {e}"))
            })?
        } else {
            Self::default()
        };

        if let Ok(key) = env::var(API_KEY_ENV) {
            config.api_key = key;
        }

        if !config.modal_close_secs.is_finite() || config.modal_close_secs < 0.0 {
            return Err(AppError::Config(format!(
                "modal_close_secs must be a non-negative number, got {}",
                config.modal_close_secs
            )));
        }
        if config.page_size == 0 {
            return Err(AppError::Config(
                "page_size must be at least 1".to_string(),
            ));
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_when_file_missing() {
        let config = AppConfig::load("does-not-exist.toml").unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.page_size, 10);
        assert_eq!(config.bookmarks_path, "bookmarks.json");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "page_size = 5").unwrap();
        let config = AppConfig::load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.page_size, 5);
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn test_negative_modal_close_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "modal_close_secs = -1.0").unwrap();
        let result = AppConfig::load(file.path().to_str().unwrap());
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_zero_page_size_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "page_size = 0").unwrap();
        let result = AppConfig::load(file.path().to_str().unwrap());
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_malformed_file_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "page_size = \"lots\"").unwrap();
        let result = AppConfig::load(file.path().to_str().unwrap());
        assert!(matches!(result, Err(AppError::Config(_))));
    }
}
