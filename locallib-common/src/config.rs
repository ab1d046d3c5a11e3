//! Configuration loading for the catalog service
//!
//! Every setting is resolved in the same priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)

use crate::{Error, Result};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{info, warn};

/// Environment variable holding the store URL
pub const ENV_DATABASE_URL: &str = "LOCALLIB_DATABASE_URL";
/// Environment variable holding the listen address
pub const ENV_BIND_ADDR: &str = "LOCALLIB_BIND";
/// Environment variable selecting development or production behavior
pub const ENV_ENVIRONMENT: &str = "LOCALLIB_ENV";
/// Environment variable pointing at an explicit TOML config file
pub const ENV_CONFIG_FILE: &str = "LOCALLIB_CONFIG";

/// Default listen address
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Runtime environment
///
/// Development mode shows error details on the 500 page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    #[default]
    Production,
}

impl Environment {
    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Development => f.write_str("development"),
            Environment::Production => f.write_str("production"),
        }
    }
}

impl FromStr for Environment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(Error::Config(format!(
                "Unknown environment '{}' (expected development or production)",
                other
            ))),
        }
    }
}

/// Settings that may appear in the TOML config file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    pub database_url: Option<String>,
    pub bind_addr: Option<String>,
    pub environment: Option<Environment>,
}

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub database_url: Option<String>,
    pub bind_addr: Option<String>,
    pub environment: Option<Environment>,
    pub config_file: Option<PathBuf>,
}

/// Fully resolved catalog configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    pub database_url: String,
    pub bind_addr: String,
    pub environment: Environment,
}

impl CatalogConfig {
    /// Resolve configuration from CLI values, environment, config file and defaults
    pub fn resolve(cli: CliOverrides) -> Result<Self> {
        let toml_config = match config_file_path(cli.config_file.as_deref()) {
            Some(path) => load_toml_config(&path)?,
            None => TomlConfig::default(),
        };

        let database_url = cli
            .database_url
            .or_else(|| env_value(ENV_DATABASE_URL))
            .or(toml_config.database_url)
            .unwrap_or_else(default_database_url);

        let bind_addr = cli
            .bind_addr
            .or_else(|| env_value(ENV_BIND_ADDR))
            .or(toml_config.bind_addr)
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        let environment = match cli.environment {
            Some(env) => env,
            None => match env_value(ENV_ENVIRONMENT) {
                Some(value) => value.parse()?,
                None => toml_config.environment.unwrap_or_default(),
            },
        };

        Ok(Self {
            database_url,
            bind_addr,
            environment,
        })
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Pick the config file to read, if any
///
/// An explicitly named file must exist. The per-user default location is only
/// used when present; a missing default file means "use defaults".
fn config_file_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Some(path) = env_value(ENV_CONFIG_FILE) {
        return Some(PathBuf::from(path));
    }
    match default_config_path() {
        Some(path) if path.exists() => Some(path),
        Some(path) => {
            info!("No config file at {} (using defaults)", path.display());
            None
        }
        None => None,
    }
}

/// Load and parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        warn!("Failed to read config file {}: {}", path.display(), e);
        Error::Config(format!("Cannot read config file {}: {}", path.display(), e))
    })?;

    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Invalid config file {}: {}", path.display(), e)))
}

/// Per-user config file location, e.g. `~/.config/locallib/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("locallib").join("config.toml"))
}

/// Default store location inside the OS data directory
pub fn default_database_url() -> String {
    let dir = dirs::data_local_dir()
        .map(|d| d.join("locallib"))
        .unwrap_or_else(|| PathBuf::from("./locallib_data"));
    format!("sqlite://{}?mode=rwc", dir.join("library.db").display())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_parse() {
        assert_eq!("development".parse::<Environment>().unwrap(), Environment::Development);
        assert_eq!(" PROD ".parse::<Environment>().unwrap(), Environment::Production);
        assert!("staging".parse::<Environment>().is_err());
    }

    #[test]
    fn test_environment_defaults_to_production() {
        assert_eq!(Environment::default(), Environment::Production);
        assert!(!Environment::default().is_development());
    }

    #[test]
    fn test_default_database_url_has_no_credentials() {
        let url = default_database_url();
        assert!(url.starts_with("sqlite://"));
        assert!(url.ends_with("library.db?mode=rwc"));
        assert!(!url.contains('@'));
    }

    #[test]
    fn test_toml_rejects_unknown_keys() {
        let parsed: std::result::Result<TomlConfig, _> = toml::from_str("port = 80");
        assert!(parsed.is_err());
    }
}
