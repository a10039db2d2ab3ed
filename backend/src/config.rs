//! Application configuration file support.
//!
//! Settings are read from `flight-calendar.toml` when one is found and fall
//! back to built-in defaults otherwise. A few environment variables override
//! the file.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::time::{default_floor_date, parse_date_text};
use crate::services::flight_table::{clamp_page_size, DEFAULT_PAGE_SIZE};

pub const CONFIG_FILE_NAME: &str = "flight-calendar.toml";

pub const ENV_HOST: &str = "HOST";
pub const ENV_PORT: &str = "PORT";
pub const ENV_FLOOR_DATE: &str = "FLIGHT_CALENDAR_FLOOR_DATE";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },

    #[error("no flight-calendar.toml found in standard locations")]
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub calendar: CalendarSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarSettings {
    /// Occurrences before this date are never generated.
    #[serde(default = "default_floor_date")]
    pub floor_date: NaiveDate,
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_upload_bytes() -> usize {
    50 * 1024 * 1024
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl Default for CalendarSettings {
    fn default() -> Self {
        Self {
            floor_date: default_floor_date(),
            default_page_size: default_page_size(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: AppConfig = toml::from_str(&content)?;
        config.calendar.default_page_size = clamp_page_size(config.calendar.default_page_size);
        Ok(config)
    }

    /// Load configuration from the first `flight-calendar.toml` found in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> Result<Self, ConfigError> {
        let search_paths = [
            PathBuf::from(CONFIG_FILE_NAME),
            PathBuf::from("backend").join(CONFIG_FILE_NAME),
            PathBuf::from("..").join(CONFIG_FILE_NAME),
        ];

        for path in search_paths {
            if path.exists() {
                log::info!("loading configuration from {}", path.display());
                return Self::from_file(&path);
            }
        }
        Err(ConfigError::NotFound)
    }

    /// Apply `HOST`, `PORT` and `FLIGHT_CALENDAR_FLOOR_DATE` when set.
    pub fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        if let Ok(host) = env::var(ENV_HOST) {
            self.server.host = host;
        }
        if let Ok(port) = env::var(ENV_PORT) {
            self.server.port = port.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: ENV_PORT.to_string(),
                value: port.clone(),
            })?;
        }
        if let Ok(floor) = env::var(ENV_FLOOR_DATE) {
            self.calendar.floor_date =
                parse_date_text(&floor).ok_or_else(|| ConfigError::InvalidValue {
                    key: ENV_FLOOR_DATE.to_string(),
                    value: floor.clone(),
                })?;
        }
        Ok(self)
    }

    /// File from the default locations (or defaults when there is none), then
    /// environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let base = match Self::from_default_location() {
            Ok(config) => config,
            Err(ConfigError::NotFound) => {
                log::debug!("no {} found, using defaults", CONFIG_FILE_NAME);
                Self::default()
            }
            Err(e) => return Err(e),
        };
        base.apply_env_overrides()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.max_upload_bytes, 50 * 1024 * 1024);
        assert_eq!(
            config.calendar.floor_date,
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
        );
        assert_eq!(config.calendar.default_page_size, 100);
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_parse_partial_config() {
        let toml = r#"
[server]
port = 9000

[calendar]
floor_date = "2025-03-01"
"#;
        let config: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(
            config.calendar.floor_date,
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
        );
        assert_eq!(config.calendar.default_page_size, 100);
    }

    #[test]
    fn test_empty_file_is_all_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_from_file_clamps_page_size() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[calendar]\ndefault_page_size = 5").unwrap();
        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.calendar.default_page_size, 10);
    }

    #[test]
    fn test_from_file_errors() {
        assert!(matches!(
            AppConfig::from_file("/definitely/not/here.toml"),
            Err(ConfigError::Read { .. })
        ));
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = \"eighty\"").unwrap();
        assert!(matches!(
            AppConfig::from_file(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }
}
