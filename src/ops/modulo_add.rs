//! Implementation of `modulo add`, `modulo remove` and `modulo list`.
//!
//! Each mutation is a full load-modify-save cycle on the manifest file.

use std::path::Path;

use crate::core::manifest::{Manifest, ManifestError};

/// Outcome of removing a dependency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveResult {
    /// The first occurrence of the dependency was removed.
    Removed { name: String },
    /// The manifest does not list the dependency; nothing was written.
    NotFound { name: String },
}

/// Append a dependency to the manifest. Duplicates are allowed.
pub fn add_dependency(manifest_path: &Path, name: &str) -> Result<Manifest, ManifestError> {
    let mut manifest = Manifest::load(manifest_path)?;

    if manifest.dependencies.iter().any(|dep| dep == name) {
        tracing::debug!("`{}` is already listed; adding it again", name);
    }

    manifest.add_dependency(name);
    manifest.save(manifest_path)?;
    Ok(manifest)
}

/// Remove the first occurrence of a dependency from the manifest.
pub fn remove_dependency(manifest_path: &Path, name: &str) -> Result<RemoveResult, ManifestError> {
    let mut manifest = Manifest::load(manifest_path)?;

    if !manifest.remove_dependency(name) {
        return Ok(RemoveResult::NotFound {
            name: name.to_string(),
        });
    }

    manifest.save(manifest_path)?;
    Ok(RemoveResult::Removed {
        name: name.to_string(),
    })
}

/// Dependencies in manifest order.
pub fn list_dependencies(manifest_path: &Path) -> Result<Vec<String>, ManifestError> {
    Ok(Manifest::load(manifest_path)?.dependencies)
}
