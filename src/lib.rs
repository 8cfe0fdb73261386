//! Modulo - a small local package manager for C and C++ projects
//!
//! This crate provides the library behind the `modulo` CLI: registry
//! resolution, archive installation, manifest bookkeeping, and compiler
//! command synthesis.

pub mod builder;
pub mod core;
pub mod ops;
pub mod sources;
pub mod util;

/// Test fixtures for Modulo unit tests.
///
/// Only available when compiling tests. Builds package archives, registries
/// and installed layouts inside temporary directories.
#[cfg(test)]
pub mod test_support;

pub use core::{
    layout::{DirRole, RoleDirs},
    manifest::Manifest,
    registry::Registry,
};

pub use builder::{CompileCommand, Compiler};
pub use util::context::GlobalContext;
