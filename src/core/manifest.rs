//! cpkg.json manifest parsing and persistence.
//!
//! The manifest records a project's name and the packages it depends on:
//!
//! ```json
//! {
//!     "name": "demo",
//!     "dependencies": [
//!         "zlib",
//!         "glfw"
//!     ]
//! }
//! ```
//!
//! Dependencies keep their insertion order and may repeat. The file is
//! rewritten in full on every save; there is no locking, so two processes
//! mutating the same manifest race and the last writer wins.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Manifest file name, looked up in the project directory.
pub const MANIFEST_NAME: &str = "cpkg.json";

/// Errors from manifest access.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("{} not found", path.display())]
    NotFound { path: PathBuf },

    #[error("{} is malformed", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to access {}", path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A project manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// Project name, also used as the output executable name
    pub name: String,

    /// Declared dependencies in manifest order (duplicates allowed)
    pub dependencies: Vec<String>,

    /// Fields Modulo does not know about, preserved across rewrites
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Manifest {
    /// Create a manifest with no dependencies.
    pub fn new(name: impl Into<String>) -> Self {
        Manifest {
            name: name.into(),
            dependencies: Vec::new(),
            extra: serde_json::Map::new(),
        }
    }

    /// Load a manifest from disk.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                ManifestError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                ManifestError::Storage {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        Self::parse(&content, path)
    }

    /// Parse manifest content. `path` is only used for error messages.
    pub fn parse(content: &str, path: &Path) -> Result<Self, ManifestError> {
        serde_json::from_str(content).map_err(|source| ManifestError::Corrupt {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Serialize with four-space indentation and a trailing newline.
    pub fn to_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        buf.push(b'\n');
        Ok(buf)
    }

    /// Write the manifest, replacing whatever is at `path`.
    pub fn save(&self, path: &Path) -> Result<(), ManifestError> {
        let storage = |source: io::Error| ManifestError::Storage {
            path: path.to_path_buf(),
            source,
        };

        let bytes = self.to_json().map_err(|e| storage(e.into()))?;
        std::fs::write(path, bytes).map_err(storage)
    }

    /// Append a dependency. Duplicates are kept.
    pub fn add_dependency(&mut self, name: impl Into<String>) {
        self.dependencies.push(name.into());
    }

    /// Remove the first occurrence of `name`, keeping the order of the rest.
    ///
    /// Returns false if `name` is not a dependency.
    pub fn remove_dependency(&mut self, name: &str) -> bool {
        match self.dependencies.iter().position(|dep| dep == name) {
            Some(index) => {
                self.dependencies.remove(index);
                true
            }
            None => false,
        }
    }
}
