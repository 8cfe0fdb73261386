//! The package registry: a JSON document mapping package names to archive URLs.
//!
//! ```json
//! {
//!     "glfw": "https://github.com/glfw/glfw/releases/download/3.4/glfw-3.4.bin.WIN64.zip",
//!     "zlib": {
//!         "url": "https://example.com/zlib-1.3.1.zip",
//!         "sha256": "9a93b2b7dfdac77ceba5a558a580e74667dd6fede4585b91eefb60f03b72df23"
//!     }
//! }
//! ```
//!
//! The registry is read-only and reloaded on every lookup; nothing is cached
//! between calls.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default registry file name, looked up in the working directory.
pub const REGISTRY_NAME: &str = "registry.json";

/// Errors from registry access.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("registry unavailable: {}", path.display())]
    Unavailable {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("package `{name}` not found in registry")]
    NotFound {
        name: String,
        suggestions: Vec<String>,
    },
}

/// A single registry entry.
///
/// Either a bare URL string or a table carrying an optional checksum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RegistryEntry {
    Url(String),
    Detailed {
        url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        sha256: Option<String>,
    },
}

impl RegistryEntry {
    /// Archive location.
    pub fn url(&self) -> &str {
        match self {
            RegistryEntry::Url(url) => url,
            RegistryEntry::Detailed { url, .. } => url,
        }
    }

    /// Expected SHA256 of the archive, lowercase hex.
    pub fn sha256(&self) -> Option<&str> {
        match self {
            RegistryEntry::Url(_) => None,
            RegistryEntry::Detailed { sha256, .. } => sha256.as_deref(),
        }
    }
}

/// The full name → entry mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Registry {
    entries: BTreeMap<String, RegistryEntry>,
}

impl Registry {
    /// Load the registry document from disk.
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        let content = std::fs::read_to_string(path).map_err(|e| RegistryError::Unavailable {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;

        Self::parse(&content, path)
    }

    /// Parse registry content. `path` is only used for error messages.
    pub fn parse(content: &str, path: &Path) -> Result<Self, RegistryError> {
        serde_json::from_str(content).map_err(|e| RegistryError::Unavailable {
            path: path.to_path_buf(),
            source: Box::new(e),
        })
    }

    /// Look up a package entry.
    pub fn get(&self, name: &str) -> Option<&RegistryEntry> {
        self.entries.get(name)
    }

    /// Look up a package entry, failing with [`RegistryError::NotFound`].
    pub fn resolve(&self, name: &str) -> Result<&RegistryEntry, RegistryError> {
        self.get(name).ok_or_else(|| RegistryError::NotFound {
            name: name.to_string(),
            suggestions: self.similar_names(name),
        })
    }

    /// All package names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Package names containing `query`, case-insensitively.
    pub fn search(&self, query: &str) -> Vec<&str> {
        let query = query.to_lowercase();
        self.names()
            .filter(|name| name.to_lowercase().contains(&query))
            .collect()
    }

    /// Number of packages.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry lists no packages.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn similar_names(&self, name: &str) -> Vec<String> {
        let needle = name.to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.names()
            .filter(|candidate| {
                let candidate = candidate.to_lowercase();
                candidate.contains(&needle) || needle.contains(&candidate)
            })
            .map(str::to_string)
            .collect()
    }
}

/// Resolve a package name against the registry document at `path`.
///
/// The document is read fresh on every call.
pub fn resolve(path: &Path, name: &str) -> Result<RegistryEntry, RegistryError> {
    let registry = Registry::load(path)?;
    let entry = registry.resolve(name)?.clone();
    tracing::debug!("resolved `{}` to {}", name, entry.url());
    Ok(entry)
}
