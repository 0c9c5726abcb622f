use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{ClientError, ClientResult};

pub const DEFAULT_SOURCE: &str =
    "https://raw.githubusercontent.com/Sven-Bo/datasets/master/store_sales_2022-2023.csv";
pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub dashboard: DashboardConfig,
    pub chat: ChatConfig,
    pub contact: ContactConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub source: String,
    pub current_year: i32,
    pub previous_year: i32,
    pub cities: Vec<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE.to_string(),
            current_year: 2023,
            previous_year: 2022,
            cities: vec![
                "Tokyo".to_string(),
                "Yokohama".to_string(),
                "Osaka".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub word_delay_ms: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self { word_delay_ms: 50 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    pub webhook_url: String,
}

impl Config {
    /// Loads `config.toml` from the resolved home. A missing file yields defaults.
    pub fn load(home_override: Option<&Path>) -> ClientResult<Self> {
        let home = resolve_home(home_override)?;
        Self::load_from(&home.join(CONFIG_FILE_NAME))
    }

    pub fn load_from(path: &Path) -> ClientResult<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|error| ClientError::config_unreadable(path, &error.to_string()))?;
        let config = toml::from_str::<Config>(&content)
            .map_err(|error| ClientError::config_invalid(path, &error.to_string()))?;
        debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }
}

pub fn resolve_home(home_override: Option<&Path>) -> ClientResult<PathBuf> {
    let candidate = match home_override {
        Some(path) => path.to_path_buf(),
        None => {
            if let Some(override_path) = std::env::var_os("SALESDASH_HOME") {
                PathBuf::from(override_path)
            } else if let Some(home_path) = home::home_dir() {
                home_path.join(".salesdash")
            } else {
                return Err(ClientError::home_unresolved());
            }
        }
    };

    absolutize(&candidate)
}

fn absolutize(path: &Path) -> ClientResult<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }

    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .map_err(|error| ClientError::config_unreadable(path, &error.to_string()))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::{CONFIG_FILE_NAME, Config};

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempdir();
        assert!(dir.is_ok());
        if let Ok(dir) = dir {
            let config = Config::load(Some(dir.path()));
            assert!(config.is_ok());
            if let Ok(config) = config {
                assert_eq!(config, Config::default());
                assert_eq!(config.dashboard.cities, vec!["Tokyo", "Yokohama", "Osaka"]);
                assert_eq!(config.chat.word_delay_ms, 50);
            }
        }
    }

    #[test]
    fn partial_file_keeps_unset_defaults() {
        let dir = tempdir();
        assert!(dir.is_ok());
        if let Ok(dir) = dir {
            let written = fs::write(
                dir.path().join(CONFIG_FILE_NAME),
                "[dashboard]\ncurrent_year = 2024\nprevious_year = 2023\n\n\
                 [chat]\nword_delay_ms = 0\n",
            );
            assert!(written.is_ok());

            let config = Config::load(Some(dir.path()));
            assert!(config.is_ok());
            if let Ok(config) = config {
                assert_eq!(config.dashboard.current_year, 2024);
                assert_eq!(config.dashboard.previous_year, 2023);
                assert_eq!(config.dashboard.cities.len(), 3);
                assert_eq!(config.chat.word_delay_ms, 0);
                assert!(config.contact.webhook_url.is_empty());
            }
        }
    }

    #[test]
    fn broken_toml_is_config_invalid() {
        let dir = tempdir();
        assert!(dir.is_ok());
        if let Ok(dir) = dir {
            let written = fs::write(dir.path().join(CONFIG_FILE_NAME), "[dashboard\nsource = ");
            assert!(written.is_ok());

            let config = Config::load(Some(dir.path()));
            assert!(config.is_err());
            if let Err(error) = config {
                assert_eq!(error.code, "config_invalid");
            }
        }
    }
}
