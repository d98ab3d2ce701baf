use serde::Deserialize;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file at {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse TOML from config file at {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Failed to load config from environment: {0}")]
    Env(#[from] envy::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub bind_address: SocketAddr,
    pub database_path: String,
    pub recreate_database: bool,
    pub request_timeout_secs: u64,
    pub log_dir: String,
}

// Partial config for layering
#[derive(Deserialize, Default, Debug)]
struct PartialServerConfig {
    bind_address: Option<String>,
    database_path: Option<String>,
    recreate_database: Option<bool>,
    request_timeout_secs: Option<u64>,
    log_dir: Option<String>,
}

fn default_bind_address() -> String {
    "0.0.0.0:10000".to_string()
}

fn default_database_path() -> String {
    "aqua.db".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_log_dir() -> String {
    "logs".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([0, 0, 0, 0], 10000)),
            database_path: default_database_path(),
            recreate_database: false,
            request_timeout_secs: default_request_timeout_secs(),
            log_dir: default_log_dir(),
        }
    }
}

impl ServerConfig {
    /// Loads the configuration from an optional TOML file and the process
    /// environment (including a `.env` file). Environment overrides file.
    pub fn load(config_path: Option<&str>) -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::load_from(config_path, std::env::vars())
    }

    pub fn load_from<I>(config_path: Option<&str>, env_vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        // 1. Load from file (optional)
        let file_config: PartialServerConfig = match config_path {
            Some(path_str) if Path::new(path_str).exists() => {
                let path = Path::new(path_str);
                let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;
                toml::from_str(&contents).map_err(|source| ConfigError::Parse {
                    path: path.to_path_buf(),
                    source,
                })?
            }
            _ => PartialServerConfig::default(),
        };

        // 2. Load from environment variables
        let env_config: PartialServerConfig = envy::from_iter(env_vars)?;

        // 3. Merge: environment overrides file
        let bind_address = env_config
            .bind_address
            .or(file_config.bind_address)
            .unwrap_or_else(default_bind_address);
        let bind_address: SocketAddr = bind_address.parse().map_err(|e| {
            ConfigError::Invalid(format!("bind_address {bind_address:?} is not a socket address: {e}"))
        })?;

        let request_timeout_secs = env_config
            .request_timeout_secs
            .or(file_config.request_timeout_secs)
            .unwrap_or_else(default_request_timeout_secs);
        if request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }

        Ok(ServerConfig {
            bind_address,
            database_path: env_config
                .database_path
                .or(file_config.database_path)
                .unwrap_or_else(default_database_path),
            recreate_database: env_config
                .recreate_database
                .or(file_config.recreate_database)
                .unwrap_or(false),
            request_timeout_secs,
            log_dir: env_config
                .log_dir
                .or(file_config.log_dir)
                .unwrap_or_else(default_log_dir),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults_without_file_or_env() {
        let config = ServerConfig::load_from(None, env(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.bind_address.port(), 10000);
        assert!(!config.recreate_database);
    }

    #[test]
    fn test_file_values_are_used() {
        let file = write_config(
            r#"
            bind_address = "127.0.0.1:8088"
            database_path = "/var/lib/aqua/aqua.db"
            recreate_database = true
            "#,
        );
        let config = ServerConfig::load_from(file.path().to_str(), env(&[])).unwrap();
        assert_eq!(config.bind_address, "127.0.0.1:8088".parse().unwrap());
        assert_eq!(config.database_path, "/var/lib/aqua/aqua.db");
        assert!(config.recreate_database);
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_env_overrides_file() {
        let file = write_config("database_path = \"from-file.db\"\nrequest_timeout_secs = 5\n");
        let config = ServerConfig::load_from(
            file.path().to_str(),
            env(&[("DATABASE_PATH", "from-env.db"), ("RECREATE_DATABASE", "true")]),
        )
        .unwrap();
        assert_eq!(config.database_path, "from-env.db");
        assert_eq!(config.request_timeout_secs, 5);
        assert!(config.recreate_database);
    }

    #[test]
    fn test_missing_config_file_falls_back_to_defaults() {
        let config =
            ServerConfig::load_from(Some("/nonexistent/aqua.toml"), env(&[])).unwrap();
        assert_eq!(config.database_path, "aqua.db");
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let result = ServerConfig::load_from(None, env(&[("BIND_ADDRESS", "not-an-address")]));
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let result = ServerConfig::load_from(None, env(&[("REQUEST_TIMEOUT_SECS", "0")]));
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let file = write_config("bind_address = [");
        let result = ServerConfig::load_from(file.path().to_str(), env(&[]));
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }
}
