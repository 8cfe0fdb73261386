//! Implementation of `modulo init`.

use std::path::Path;

use crate::core::manifest::{Manifest, ManifestError};

/// Create a fresh manifest at `manifest_path`.
///
/// Any existing manifest is overwritten without prompting.
pub fn init_project(manifest_path: &Path, name: &str) -> Result<Manifest, ManifestError> {
    let manifest = Manifest::new(name);
    manifest.save(manifest_path)?;
    tracing::debug!("wrote {}", manifest_path.display());
    Ok(manifest)
}
