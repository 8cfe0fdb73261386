//! High-level operations.
//!
//! This module contains the implementation of Modulo commands.

pub mod modulo_add;
pub mod modulo_compile;
pub mod modulo_init;
pub mod modulo_install;

pub use modulo_add::{add_dependency, list_dependencies, remove_dependency, RemoveResult};
pub use modulo_compile::{compile_command, run_compile, CompileError};
pub use modulo_init::init_project;
pub use modulo_install::{
    install, stage_binaries, InstallError, InstallResult, StagingFailure, StagingReport,
};
