//! Compiler command construction.
//!
//! [`toolchain`] holds the supported compilers and their flag spellings;
//! [`synth`] combines them with installed package layouts.

pub mod synth;
pub mod toolchain;

pub use synth::{synthesize, CompileCommand};
pub use toolchain::{Compiler, FlagTable, OutputFlag, UnsupportedCompiler};
