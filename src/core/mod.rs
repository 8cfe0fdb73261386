//! Core data structures for Modulo.
//!
//! - The project manifest (`cpkg.json`)
//! - The package registry (`registry.json`)
//! - Installed package layouts and their role directories

pub mod layout;
pub mod manifest;
pub mod registry;

pub use layout::{scan, DirRole, RoleDirs};
pub use manifest::{Manifest, ManifestError, MANIFEST_NAME};
pub use registry::{Registry, RegistryEntry, RegistryError, REGISTRY_NAME};
