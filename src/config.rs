//! Server configuration.

use derive_getters::Getters;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Environment variable that overrides the configured port.
pub const PORT_ENV: &str = "PORT";

/// Configuration for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    host: String,

    /// TCP port.
    port: u16,

    /// Directory with `login.html`, `waiting.html`, `game.html` and assets.
    static_dir: PathBuf,

    /// `tracing` filter used when `RUST_LOG` is unset.
    log_filter: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            static_dir: PathBuf::from("public"),
            log_filter: "info,ttt_matchmaker=debug".to_string(),
        }
    }
}

impl ServerConfig {
    /// Loads configuration from a TOML file. Missing keys take defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(port = config.port, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if given and present, else defaults.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) if path.exists() => Self::from_file(path),
            Some(path) => {
                info!(path = %path.display(), "Config file not found, using defaults");
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    /// Applies a port taken from the environment, e.g. `PORT=8080`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the value is not a valid port.
    #[instrument(skip(self))]
    pub fn with_port_env(mut self, value: Option<String>) -> Result<Self, ConfigError> {
        if let Some(value) = value {
            self.port = value
                .trim()
                .parse()
                .map_err(|e| ConfigError::new(format!("Invalid {PORT_ENV} {value:?}: {e}")))?;
        }
        Ok(self)
    }

    /// Applies command-line overrides.
    pub fn with_overrides(
        mut self,
        host: Option<String>,
        port: Option<u16>,
        static_dir: Option<PathBuf>,
    ) -> Self {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        if let Some(static_dir) = static_dir {
            self.static_dir = static_dir;
        }
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display)]
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
    /// Creates a new configuration error at the caller's location.
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

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "port = 8080").expect("write");

        let config = ServerConfig::from_file(file.path()).expect("load");
        assert_eq!(*config.port(), 8080);
        assert_eq!(config.host(), "127.0.0.1");
        assert_eq!(config.static_dir(), &PathBuf::from("public"));
    }

    #[test]
    fn test_bad_toml_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "port = \"not a number\"").expect("write");

        let err = ServerConfig::from_file(file.path()).unwrap_err();
        assert!(err.message.starts_with("Failed to parse config"));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = ServerConfig::load(Some(Path::new("/nonexistent/ttt.toml"))).expect("load");
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn test_precedence() {
        let config = ServerConfig::default()
            .with_port_env(Some("4000".to_string()))
            .expect("port env")
            .with_overrides(None, Some(5000), None);
        assert_eq!(*config.port(), 5000);

        let config = ServerConfig::default()
            .with_port_env(Some("4000".to_string()))
            .expect("port env")
            .with_overrides(Some("0.0.0.0".to_string()), None, None);
        assert_eq!(*config.port(), 4000);
        assert_eq!(config.host(), "0.0.0.0");
    }

    #[test]
    fn test_invalid_port_env() {
        assert!(ServerConfig::default().with_port_env(Some("http".to_string())).is_err());
    }
}
