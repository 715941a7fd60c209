//! Configuration loading and root folder resolution
//!
//! Resolution order for every setting:
//! 1. Command-line argument / environment variable (merged by the caller)
//! 2. `SONGBOOK_ROOT_FOLDER` environment variable (root folder only)
//! 3. TOML config file
//! 4. Compiled default

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment variable naming the root folder
pub const ROOT_FOLDER_ENV: &str = "SONGBOOK_ROOT_FOLDER";

/// Database file name inside the root folder
pub const DATABASE_FILE: &str = "songbook.db";

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1";
pub const DEFAULT_SESSION_TTL_HOURS: i64 = 24;

/// Longest accepted session lifetime (100 years)
pub const MAX_SESSION_TTL_HOURS: i64 = 24 * 365 * 100;

/// Contents of `config.toml`. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub root_folder: Option<PathBuf>,
    pub port: Option<u16>,
    pub bind_address: Option<String>,
    pub session_ttl_hours: Option<i64>,
    pub password_cost: Option<u32>,
}

impl TomlConfig {
    /// Parse a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Invalid TOML in {}: {}", path.display(), e)))
    }
}

/// Values supplied on the command line (or via env through clap)
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub root_folder: Option<PathBuf>,
    pub port: Option<u16>,
    pub bind_address: Option<String>,
    pub config_file: Option<PathBuf>,
}

/// Fully resolved application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub root_folder: PathBuf,
    pub port: u16,
    pub bind_address: String,
    pub session_ttl_hours: i64,
    pub password_cost: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            root_folder: default_root_folder(),
            port: DEFAULT_PORT,
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            session_ttl_hours: DEFAULT_SESSION_TTL_HOURS,
            password_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl AppConfig {
    /// Resolve configuration from overrides, environment, TOML file and defaults.
    ///
    /// A missing config file is not an error. An unreadable or invalid one is
    /// logged and ignored.
    pub fn resolve(overrides: ConfigOverrides) -> Self {
        let toml_config = match overrides.config_file.clone().or_else(default_config_file) {
            Some(path) if path.exists() => match TomlConfig::load(&path) {
                Ok(config) => {
                    debug!("Loaded config file {}", path.display());
                    config
                }
                Err(e) => {
                    warn!("Ignoring config file {}: {}", path.display(), e);
                    TomlConfig::default()
                }
            },
            Some(path) => {
                debug!("No config file at {}, using defaults", path.display());
                TomlConfig::default()
            }
            None => TomlConfig::default(),
        };

        Self::merge(overrides, toml_config)
    }

    /// Merge overrides over a parsed TOML config over compiled defaults
    pub fn merge(overrides: ConfigOverrides, toml_config: TomlConfig) -> Self {
        let defaults = Self::default();

        let root_folder = overrides
            .root_folder
            .or_else(|| std::env::var(ROOT_FOLDER_ENV).ok().map(PathBuf::from))
            .or(toml_config.root_folder)
            .unwrap_or(defaults.root_folder);

        let session_ttl_hours = match toml_config.session_ttl_hours {
            Some(hours) if (1..=MAX_SESSION_TTL_HOURS).contains(&hours) => hours,
            Some(hours) => {
                warn!(
                    "session_ttl_hours must be within 1..={} (got {}), using {}",
                    MAX_SESSION_TTL_HOURS, hours, DEFAULT_SESSION_TTL_HOURS
                );
                DEFAULT_SESSION_TTL_HOURS
            }
            None => defaults.session_ttl_hours,
        };

        let password_cost = match toml_config.password_cost {
            Some(cost) if (4..=31).contains(&cost) => cost,
            Some(cost) => {
                warn!("password_cost must be within 4..=31 (got {}), using {}", cost, bcrypt::DEFAULT_COST);
                bcrypt::DEFAULT_COST
            }
            None => defaults.password_cost,
        };

        Self {
            root_folder,
            port: overrides.port.or(toml_config.port).unwrap_or(defaults.port),
            bind_address: overrides
                .bind_address
                .or(toml_config.bind_address)
                .unwrap_or(defaults.bind_address),
            session_ttl_hours,
            password_cost,
        }
    }

    /// Path of the SQLite database inside the root folder
    pub fn database_path(&self) -> PathBuf {
        self.root_folder.join(DATABASE_FILE)
    }

    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(self.session_ttl_hours)
    }
}

/// `<config dir>/songbook/config.toml`
fn default_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("songbook").join("config.toml"))
}

/// Get OS-dependent default root folder path
fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("songbook"))
        .unwrap_or_else(|| PathBuf::from("./songbook_data"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_beat_toml() {
        let overrides = ConfigOverrides {
            root_folder: Some(PathBuf::from("/tmp/cli-root")),
            port: Some(8080),
            bind_address: None,
            config_file: None,
        };
        let toml_config = TomlConfig {
            root_folder: Some(PathBuf::from("/tmp/toml-root")),
            port: Some(9090),
            bind_address: Some("0.0.0.0".to_string()),
            session_ttl_hours: Some(2),
            password_cost: Some(6),
        };

        let config = AppConfig::merge(overrides, toml_config);
        assert_eq!(config.root_folder, PathBuf::from("/tmp/cli-root"));
        assert_eq!(config.port, 8080);
        assert_eq!(config.bind_address, "0.0.0.0");
        assert_eq!(config.session_ttl_hours, 2);
        assert_eq!(config.password_cost, 6);
    }

    #[test]
    fn test_out_of_range_values_fall_back() {
        let toml_config = TomlConfig {
            session_ttl_hours: Some(0),
            password_cost: Some(99),
            ..Default::default()
        };

        let config = AppConfig::merge(ConfigOverrides::default(), toml_config);
        assert_eq!(config.session_ttl_hours, DEFAULT_SESSION_TTL_HOURS);
        assert_eq!(config.password_cost, bcrypt::DEFAULT_COST);
        assert_eq!(config.port, DEFAULT_PORT);

        let toml_config = TomlConfig {
            session_ttl_hours: Some(10_000_000_000),
            ..Default::default()
        };
        let config = AppConfig::merge(ConfigOverrides::default(), toml_config);
        assert_eq!(config.session_ttl_hours, DEFAULT_SESSION_TTL_HOURS);
        assert_eq!(config.session_ttl(), chrono::Duration::hours(DEFAULT_SESSION_TTL_HOURS));
    }

    #[test]
    fn test_max_session_ttl_is_accepted() {
        let toml_config = TomlConfig {
            session_ttl_hours: Some(MAX_SESSION_TTL_HOURS),
            ..Default::default()
        };

        let config = AppConfig::merge(ConfigOverrides::default(), toml_config);
        assert_eq!(config.session_ttl_hours, MAX_SESSION_TTL_HOURS);
        assert!(chrono::Utc::now().checked_add_signed(config.session_ttl()).is_some());
    }

    #[test]
    fn test_database_path_is_inside_root() {
        let config = AppConfig {
            root_folder: PathBuf::from("/srv/songbook"),
            ..Default::default()
        };
        assert_eq!(config.database_path(), PathBuf::from("/srv/songbook/songbook.db"));
    }
}
