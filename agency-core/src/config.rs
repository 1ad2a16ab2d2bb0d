use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_CONFIG_FILE: &str = "agency-admin.toml";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Sent as a bearer token when present. There is no login flow.
    pub token: Option<String>,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TableConfig {
    pub default_page_size: usize,
    pub page_size_options: Vec<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ApplicationConfig {
    pub name: String,
    pub debug_mode: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub table: TableConfig,
    pub application: ApplicationConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: "http://localhost:8000".to_string(),
            token: None,
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        TableConfig {
            default_page_size: 10,
            page_size_options: vec![5, 10, 25, 50],
        }
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        ApplicationConfig {
            name: "Agency Admin".to_string(),
            debug_mode: false,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

impl Config {
    /// Load `agency-admin.toml` from the working directory, then apply
    /// environment overrides. A missing file falls back to defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new(DEFAULT_CONFIG_FILE))
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            Self::from_file(path)?
        } else {
            log::info!("[CONFIG] {} not found, using defaults", path.display());
            Config::default()
        };

        config.apply_env_overrides()?;
        config.normalize();
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(url) = env::var("AGENCY_API_URL") {
            self.api.base_url = url;
        }
        if let Ok(token) = env::var("AGENCY_API_TOKEN") {
            self.api.token = if token.is_empty() { None } else { Some(token) };
        }
        if let Ok(value) = env::var("AGENCY_API_TIMEOUT_SECS") {
            self.api.timeout_secs = value.parse().map_err(|_| ConfigError::InvalidEnv {
                key: "AGENCY_API_TIMEOUT_SECS",
                value: value.clone(),
            })?;
        }
        if let Ok(value) = env::var("AGENCY_PAGE_SIZE") {
            match value.parse::<usize>() {
                Ok(size) if size > 0 => self.table.default_page_size = size,
                _ => {
                    return Err(ConfigError::InvalidEnv {
                        key: "AGENCY_PAGE_SIZE",
                        value,
                    })
                }
            }
        }
        Ok(())
    }

    /// Keep the default page size selectable and the option list sorted.
    fn normalize(&mut self) {
        let table = &mut self.table;
        table.page_size_options.retain(|size| *size > 0);
        if table.default_page_size == 0 {
            table.default_page_size = TableConfig::default().default_page_size;
        }
        if !table.page_size_options.contains(&table.default_page_size) {
            table.page_size_options.push(table.default_page_size);
        }
        table.page_size_options.sort_unstable();
        table.page_size_options.dedup();
        self.api.base_url = self.api.base_url.trim_end_matches('/').to_string();
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(|source| ConfigError::Write {
            path: path.display().to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.table.default_page_size, 10);
        assert_eq!(config.table.page_size_options, vec![5, 10, 25, 50]);
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[api]\nbase_url = \"https://admin.example.com/\"\n\n[table]\ndefault_page_size = 20"
        )
        .unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.api.base_url, "https://admin.example.com");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.table.default_page_size, 20);
        assert_eq!(config.table.page_size_options, vec![5, 10, 20, 25, 50]);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api\nbase_url = ").unwrap();

        let result = Config::load_from(file.path());
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agency-admin.toml");

        let mut config = Config::default();
        config.api.base_url = "http://10.0.0.5:9000".to_string();
        config.save_to(&path).unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded.api.base_url, "http://10.0.0.5:9000");
    }
}
