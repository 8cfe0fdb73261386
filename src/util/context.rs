//! Global context for Modulo operations.
//!
//! Every component receives its paths from a [`GlobalContext`] instead of
//! reading the environment itself, so tests can point the whole pipeline at
//! a temporary directory.
//!
//! ## Layout
//!
//! ```text
//! ~/.modulo/
//! ├── config.toml        # optional user configuration
//! ├── packages/<name>/   # extracted package archives
//! ├── bin/               # staged shared binaries from every package
//! └── downloads/         # fetched archives (<name>.zip, <name>.tar.gz)
//! ```
//!
//! The project manifest (`cpkg.json`) and the default registry
//! (`registry.json`) live in the current working directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::BaseDirs;

use crate::core::manifest::MANIFEST_NAME;
use crate::core::registry::REGISTRY_NAME;
use crate::util::config::{Config, ConfigError};

/// Name of the per-user base directory under the home directory.
pub const BASE_DIR_NAME: &str = ".modulo";

/// Global context containing configuration and paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Per-user base directory (~/.modulo/), if one could be determined
    home: Option<PathBuf>,

    /// Registry document override (CLI flag or environment)
    registry_override: Option<PathBuf>,

    /// Loaded user configuration
    config: Config,
}

impl GlobalContext {
    /// Create a new GlobalContext rooted at the user's home directory.
    ///
    /// A missing home directory is not an error here: commands that only
    /// touch the project manifest keep working, and the error surfaces from
    /// [`GlobalContext::home`] when a command needs installed packages.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        let home = BaseDirs::new().map(|dirs| dirs.home_dir().join(BASE_DIR_NAME));
        Ok(Self::from_parts(cwd, home))
    }

    /// Create a GlobalContext with an explicit base directory.
    pub fn with_home(cwd: PathBuf, home: PathBuf) -> Self {
        Self::from_parts(cwd, Some(home))
    }

    fn from_parts(cwd: PathBuf, home: Option<PathBuf>) -> Self {
        let config = home
            .as_ref()
            .map(|h| Config::load_or_default(&h.join("config.toml")))
            .unwrap_or_default();

        GlobalContext {
            cwd,
            home,
            registry_override: None,
            config,
        }
    }

    /// Use a specific registry document instead of the configured one.
    pub fn with_registry_path(mut self, path: PathBuf) -> Self {
        self.registry_override = Some(path);
        self
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Get the Modulo base directory (~/.modulo/).
    pub fn home(&self) -> Result<&Path, ConfigError> {
        self.home.as_deref().ok_or(ConfigError::NoHomeDirectory)
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Root directory holding one extracted directory per package.
    pub fn packages_dir(&self) -> Result<PathBuf, ConfigError> {
        Ok(self.home()?.join("packages"))
    }

    /// Installed layout root for a single package.
    pub fn package_dir(&self, name: &str) -> Result<PathBuf, ConfigError> {
        Ok(self.packages_dir()?.join(name))
    }

    /// Global directory that collects shared binaries of all packages.
    pub fn bin_dir(&self) -> Result<PathBuf, ConfigError> {
        Ok(self.home()?.join("bin"))
    }

    /// Directory where fetched archives are stored.
    pub fn downloads_dir(&self) -> Result<PathBuf, ConfigError> {
        Ok(self.home()?.join("downloads"))
    }

    /// Path of the project manifest in the working directory.
    pub fn manifest_path(&self) -> PathBuf {
        self.cwd.join(MANIFEST_NAME)
    }

    /// Path of the registry document.
    ///
    /// Precedence: explicit override, then `registry.path` from the config
    /// file, then `registry.json` in the working directory. Relative paths
    /// are resolved against the working directory.
    pub fn registry_path(&self) -> PathBuf {
        let path = self
            .registry_override
            .clone()
            .or_else(|| self.config.registry.path.clone())
            .unwrap_or_else(|| PathBuf::from(REGISTRY_NAME));

        if path.is_absolute() {
            path
        } else {
            self.cwd.join(path)
        }
    }
}
