//! # Configuration Module
//!
//! Server configuration: where to listen, how large each coroutine stack is
//! and which directory the file routes serve from.
//!
//! ## Sources
//!
//! Configuration is layered:
//! 1. Built-in defaults (`0.0.0.0:8080`, 16 KB stacks, no static dir)
//! 2. An optional config file, YAML (`.yaml`/`.yml`), TOML (`.toml`) or JSON
//! 3. Environment overrides
//!
//! ## Environment Variables
//!
//! - `TINYROUTE_HOST` - listen hostname
//! - `TINYROUTE_PORT` - listen port
//! - `TINYROUTE_STACK_SIZE` - coroutine stack size, decimal (`16384`) or
//!   hex (`0x4000`)
//! - `TINYROUTE_STATIC_DIR` - directory served under `/files/{file}`
//!
//! ## Usage
//!
//! ```rust
//! use tinyroute::config::ServerConfig;
//!
//! let mut config = ServerConfig::default();
//! config.apply_env()?;
//! assert!(config.addr().contains(':'));
//! # Ok::<(), tinyroute::config::ConfigError>(())
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Default coroutine stack size (16 KB).
pub const DEFAULT_STACK_SIZE: usize = 0x4000;

const ENV_HOST: &str = "TINYROUTE_HOST";
const ENV_PORT: &str = "TINYROUTE_PORT";
const ENV_STACK_SIZE: &str = "TINYROUTE_STACK_SIZE";
const ENV_STATIC_DIR: &str = "TINYROUTE_STATIC_DIR";

/// Failure to load or override the configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// The config file could not be read
    Io { path: PathBuf, source: io::Error },
    /// The config file could not be parsed
    Parse { path: PathBuf, message: String },
    /// An environment override holds an unusable value
    InvalidEnv { var: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "failed to read config {}: {source}", path.display())
            }
            ConfigError::Parse { path, message } => {
                write!(f, "failed to parse config {}: {message}", path.display())
            }
            ConfigError::InvalidEnv { var, value } => {
                write!(f, "invalid value for {var}: '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Hostname or IP to bind (default: `0.0.0.0`)
    pub hostname: String,
    /// Port to bind (default: 8080)
    pub port: u16,
    /// Stack size for connection coroutines in bytes (default: 16 KB / 0x4000)
    pub stack_size: usize,
    /// Directory served by the file route, if any
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            hostname: "0.0.0.0".to_string(),
            port: 8080,
            stack_size: DEFAULT_STACK_SIZE,
            static_dir: None,
        }
    }
}

impl ServerConfig {
    /// Load a config file, picking the format from its extension.
    ///
    /// Fields missing from the file keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Parse`] if it is not valid for its format.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let parse_err = |message: String| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        };
        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => {
                serde_yaml::from_str(&content).map_err(|e| parse_err(e.to_string()))?
            }
            Some("toml") => toml::from_str(&content).map_err(|e| parse_err(e.to_string()))?,
            _ => serde_json::from_str(&content).map_err(|e| parse_err(e.to_string()))?,
        };
        info!(path = %path.display(), "Configuration loaded");
        Ok(config)
    }

    /// Apply `TINYROUTE_*` overrides from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnv`] if `TINYROUTE_PORT` is not a port
    /// number.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|var| env::var(var).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    ///
    /// An unparsable stack size is logged and replaced by the default rather
    /// than failing startup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnv`] if the port is not a port number.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(ENV_HOST) {
            self.hostname = host;
        }
        if let Some(port) = lookup(ENV_PORT) {
            self.port = port.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                var: ENV_PORT,
                value: port,
            })?;
        }
        if let Some(size) = lookup(ENV_STACK_SIZE) {
            self.stack_size = parse_stack_size(&size).unwrap_or_else(|| {
                warn!(
                    value = %size,
                    default = DEFAULT_STACK_SIZE,
                    "Invalid stack size, using default"
                );
                DEFAULT_STACK_SIZE
            });
        }
        if let Some(dir) = lookup(ENV_STATIC_DIR) {
            self.static_dir = Some(PathBuf::from(dir));
        }
        Ok(())
    }

    /// `hostname:port`, ready for binding.
    #[must_use]
    pub fn addr(&self) -> String {
        format!("{}:{}", self.hostname, self.port)
    }

    /// Configure the `may` runtime with this config's stack size.
    ///
    /// Must run before the server starts spawning coroutines.
    pub fn apply_runtime(&self) {
        may::config().set_stack_size(self.stack_size);
        info!(stack_size = self.stack_size, "Coroutine runtime configured");
    }
}

/// Parse a stack size given in decimal or `0x`-prefixed hex.
#[must_use]
pub fn parse_stack_size(value: &str) -> Option<usize> {
    let value = value.trim();
    match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => usize::from_str_radix(hex, 16).ok(),
        None => value.parse().ok(),
    }
}
