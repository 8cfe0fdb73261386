//! Configuration file support for Modulo.
//!
//! Modulo reads a single user-wide configuration file at
//! `~/.modulo/config.toml`. Every setting is optional; a missing file means
//! defaults, and a malformed file is reported as a warning and ignored.
//!
//! ```toml
//! [registry]
//! path = "/opt/modulo/registry.json"
//!
//! [install]
//! min_artifact_size = 100
//! shared_lib_extension = "dll"
//!
//! [net]
//! timeout = 120
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Artifacts smaller than this are treated as corrupt downloads.
pub const DEFAULT_MIN_ARTIFACT_SIZE: u64 = 100;

/// Errors raised while establishing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine the user home directory; set MODULO_HOME")]
    NoHomeDirectory,

    #[error("failed to read config file: {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file: {}", path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Modulo configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Registry settings
    pub registry: RegistryConfig,

    /// Install settings
    pub install: InstallConfig,

    /// Network settings
    pub net: NetConfig,
}

/// Registry location override.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Path to the registry document (defaults to `./registry.json`)
    pub path: Option<PathBuf>,
}

/// Installer settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallConfig {
    /// Minimum byte size for a downloaded archive to be accepted
    pub min_artifact_size: u64,

    /// File extension (without dot) of shared binaries staged into `bin/`
    pub shared_lib_extension: String,
}

impl Default for InstallConfig {
    fn default() -> Self {
        InstallConfig {
            min_artifact_size: DEFAULT_MIN_ARTIFACT_SIZE,
            shared_lib_extension: std::env::consts::DLL_EXTENSION.to_string(),
        }
    }
}

/// Network-related configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NetConfig {
    /// Download timeout in seconds (no timeout when unset)
    pub timeout: Option<u64>,

    /// User agent sent with HTTP requests
    pub user_agent: Option<String>,
}

impl NetConfig {
    /// The download timeout, if one is configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| ConfigError::Invalid {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load configuration with fallback to defaults if the file doesn't exist
    /// or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }
}
