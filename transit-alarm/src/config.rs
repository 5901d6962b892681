//! Startup configuration.
//!
//! The TransLink API key comes from the `TRANSLINK_API_KEY` environment
//! variable or, failing that, from a JSON key-value file (`ApiKeys.json`
//! by default). A missing key is a startup error, never a panic.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::DEFAULT_MONITOR_RADIUS_M;

/// Name of the API key, both as env var and as key-file entry.
pub const API_KEY_NAME: &str = "TRANSLINK_API_KEY";

/// Env var overriding the key-file location.
pub const KEY_FILE_ENV: &str = "TRANSIT_ALARM_KEYS";

/// Env var overriding the RTTI base URL.
pub const BASE_URL_ENV: &str = "TRANSLINK_BASE_URL";

/// Env var overriding the listen address.
pub const ADDR_ENV: &str = "TRANSIT_ALARM_ADDR";

const DEFAULT_KEY_FILE: &str = "ApiKeys.json";
const DEFAULT_BASE_URL: &str = "http://api.translink.ca";
const DEFAULT_ADDR: &str = "127.0.0.1:3000";

/// Errors loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The key was not found in the environment or the key file
    #[error("{name} not set: export it or add it to {path}")]
    MissingKey { name: &'static str, path: PathBuf },

    /// The key file exists but could not be read
    #[error("failed to read key file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The key file is not a JSON object of strings
    #[error("malformed key file {path}: {message}")]
    Malformed { path: PathBuf, message: String },

    /// The listen address does not parse
    #[error("invalid listen address {0:?}")]
    InvalidAddress(String),
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: String,
    pub base_url: String,
    pub listen_addr: SocketAddr,
    pub monitor_radius_m: f64,
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(|name| std::env::var(name).ok())
    }

    /// Load configuration using `lookup` in place of the environment.
    pub fn load(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let key_file = lookup(KEY_FILE_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_KEY_FILE));

        let api_key = match lookup(API_KEY_NAME).filter(|k| !k.trim().is_empty()) {
            Some(key) => {
                debug!("API key taken from environment");
                key
            }
            None => read_key(&key_file, API_KEY_NAME)?,
        };

        let listen_addr = lookup(ADDR_ENV).unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let listen_addr: SocketAddr = listen_addr
            .parse()
            .map_err(|_| ConfigError::InvalidAddress(listen_addr.clone()))?;

        Ok(Self {
            api_key,
            base_url: lookup(BASE_URL_ENV).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            listen_addr,
            monitor_radius_m: DEFAULT_MONITOR_RADIUS_M,
        })
    }
}

/// Look up `name` in a JSON key-value file.
pub fn read_key(path: &Path, name: &'static str) -> Result<String, ConfigError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ConfigError::MissingKey {
                name,
                path: path.to_path_buf(),
            });
        }
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let keys: HashMap<String, String> =
        serde_json::from_str(&contents).map_err(|e| ConfigError::Malformed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    debug!(path = %path.display(), "loaded key file");

    keys.get(name)
        .filter(|k| !k.trim().is_empty())
        .cloned()
        .ok_or_else(|| ConfigError::MissingKey {
            name,
            path: path.to_path_buf(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn env_key_wins() {
        let config = AppConfig::load(env(&[
            (API_KEY_NAME, "from-env"),
            (KEY_FILE_ENV, "/nonexistent/ApiKeys.json"),
        ]))
        .unwrap();
        assert_eq!(config.api_key, "from-env");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.listen_addr, "127.0.0.1:3000".parse().unwrap());
        assert_eq!(config.monitor_radius_m, 500.0);
    }

    #[test]
    fn key_file_used_when_env_missing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ApiKeys.json");
        std::fs::write(&path, r#"{"TRANSLINK_API_KEY": "from-file", "OTHER": "x"}"#).unwrap();

        let config =
            AppConfig::load(env(&[(KEY_FILE_ENV, path.to_str().unwrap())])).unwrap();
        assert_eq!(config.api_key, "from-file");
    }

    #[test]
    fn blank_env_key_falls_back_to_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("keys.json");
        std::fs::write(&path, r#"{"TRANSLINK_API_KEY": "from-file"}"#).unwrap();

        let config = AppConfig::load(env(&[
            (API_KEY_NAME, "  "),
            (KEY_FILE_ENV, path.to_str().unwrap()),
        ]))
        .unwrap();
        assert_eq!(config.api_key, "from-file");
    }

    #[test]
    fn missing_file_is_missing_key() {
        let err = AppConfig::load(env(&[(KEY_FILE_ENV, "/nonexistent/ApiKeys.json")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingKey { .. }));
        assert!(err.to_string().contains("TRANSLINK_API_KEY"));
    }

    #[test]
    fn missing_entry_is_missing_key() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ApiKeys.json");
        std::fs::write(&path, r#"{"SOME_OTHER_KEY": "abc"}"#).unwrap();

        let err = read_key(&path, API_KEY_NAME).unwrap_err();
        assert!(matches!(err, ConfigError::MissingKey { .. }));
    }

    #[test]
    fn malformed_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ApiKeys.json");
        std::fs::write(&path, "TRANSLINK_API_KEY=abc").unwrap();

        let err = read_key(&path, API_KEY_NAME).unwrap_err();
        assert!(matches!(err, ConfigError::Malformed { .. }));
    }

    #[test]
    fn overrides() {
        let config = AppConfig::load(env(&[
            (API_KEY_NAME, "k"),
            (BASE_URL_ENV, "http://localhost:9999"),
            (ADDR_ENV, "0.0.0.0:8080"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "http://localhost:9999");
        assert_eq!(config.listen_addr.port(), 8080);
    }

    #[test]
    fn bad_address() {
        let err = AppConfig::load(env(&[(API_KEY_NAME, "k"), (ADDR_ENV, "nowhere")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidAddress(_)));
    }
}
