//! Server configuration: TOML file, then environment, then CLI flags.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Environment variable overriding the bind host.
pub const HOST_VAR: &str = "STRICTLY_MEMORY_HOST";
/// Environment variable overriding the bind port.
pub const PORT_VAR: &str = "STRICTLY_MEMORY_PORT";
/// Fallback port variable used by most hosting platforms.
pub const PLAIN_PORT_VAR: &str = "PORT";

/// Configuration for the HTTP server and local players.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind.
    #[serde(default = "default_host")]
    host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    #[getter(copy)]
    port: u16,

    /// How long a mismatched pair stays face up before resolve, in milliseconds.
    #[serde(default = "default_mismatch_delay_ms")]
    #[getter(copy)]
    mismatch_delay_ms: u64,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_mismatch_delay_ms() -> u64 {
    700
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            mismatch_delay_ms: default_mismatch_delay_ms(),
        }
    }
}

impl ServerConfig {
    /// Loads configuration from a TOML file. Missing keys take their defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(host = %config.host, port = config.port, "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Loads the config file if one is given, else the defaults, then applies
    /// environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let base = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        base.with_env_overrides()
    }

    /// Applies `STRICTLY_MEMORY_HOST`, `STRICTLY_MEMORY_PORT`, and `PORT`.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Applies overrides read through `lookup`, as if it were the environment.
    ///
    /// `STRICTLY_MEMORY_PORT` wins over `PORT` when both are set.
    #[instrument(skip(self, lookup))]
    pub fn with_overrides_from(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(host) = lookup(HOST_VAR).filter(|h| !h.trim().is_empty()) {
            debug!(%host, "Host overridden from environment");
            self.host = host.trim().to_string();
        }

        let port = [PORT_VAR, PLAIN_PORT_VAR]
            .into_iter()
            .find_map(|key| lookup(key).map(|value| (key, value)));
        if let Some((key, value)) = port {
            self.port = value.trim().parse().map_err(|_| {
                ConfigError::new(format!("{} must be a port number, got '{}'", key, value))
            })?;
            debug!(port = self.port, key, "Port overridden from environment");
        }

        Ok(self)
    }

    /// Applies command-line flags, which win over everything else.
    pub fn with_cli(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        self
    }

    /// Overrides the mismatch delay when a flag value is given.
    pub fn with_mismatch_delay_ms(mut self, delay_ms: Option<u64>) -> Self {
        if let Some(delay_ms) = delay_ms {
            self.mismatch_delay_ms = delay_ms;
        }
        self
    }

    /// `host:port`, ready to bind.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// The mismatch display delay.
    pub fn mismatch_delay(&self) -> Duration {
        Duration::from_millis(self.mismatch_delay_ms)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.address(), "127.0.0.1:3000");
        assert_eq!(config.mismatch_delay(), Duration::from_millis(700));
    }

    #[test]
    fn test_from_file_fills_missing_keys() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "port = 8080").unwrap();

        let config = ServerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.port(), 8080);
        assert_eq!(config.host(), "127.0.0.1");
        assert_eq!(config.mismatch_delay_ms(), 700);
    }

    #[test]
    fn test_from_file_rejects_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "port = \"many\"").unwrap();

        let err = ServerConfig::from_file(file.path()).unwrap_err();
        assert!(err.message.starts_with("Failed to parse config"));
        assert!(err.file.ends_with("config.rs"));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ServerConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
        assert!(err.message.starts_with("Failed to read config file"));
    }

    #[test]
    fn test_env_overrides_prefer_specific_port() {
        let config = ServerConfig::default()
            .with_overrides_from(env(&[
                (HOST_VAR, "0.0.0.0"),
                (PORT_VAR, "4100"),
                (PLAIN_PORT_VAR, "5000"),
            ]))
            .unwrap();
        assert_eq!(config.address(), "0.0.0.0:4100");
    }

    #[test]
    fn test_plain_port_fallback() {
        let config = ServerConfig::default()
            .with_overrides_from(env(&[(PLAIN_PORT_VAR, "5000")]))
            .unwrap();
        assert_eq!(config.port(), 5000);
    }

    #[test]
    fn test_bad_port_override() {
        let err = ServerConfig::default()
            .with_overrides_from(env(&[(PORT_VAR, "http")]))
            .unwrap_err();
        assert!(err.message.contains(PORT_VAR));
    }

    #[test]
    fn test_load_reads_mismatch_delay() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "mismatch_delay_ms = 100").unwrap();

        let config = ServerConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.mismatch_delay(), Duration::from_millis(100));
    }

    #[test]
    fn test_delay_flag_wins_over_file() {
        let config = ServerConfig::from_toml("mismatch_delay_ms = 100").unwrap();
        assert_eq!(config.clone().with_mismatch_delay_ms(None).mismatch_delay_ms(), 100);
        assert_eq!(config.with_mismatch_delay_ms(Some(0)).mismatch_delay(), Duration::ZERO);
    }

    #[test]
    fn test_cli_wins() {
        let config = ServerConfig::from_toml("host = \"10.0.0.1\"\nport = 1")
            .unwrap()
            .with_cli(None, Some(9000));
        assert_eq!(config.address(), "10.0.0.1:9000");
    }
}
