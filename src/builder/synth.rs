//! Compiler command synthesis.
//!
//! Turns a manifest into a single compiler invocation: the output name comes
//! from the project name, then every dependency contributes one include flag
//! per `include` directory and one library path flag per `lib` directory
//! found in its installed layout. Caller-supplied arguments go last.

use std::fmt;
use std::path::Path;

use crate::builder::toolchain::Compiler;
use crate::core::layout::{self, DirRole};
use crate::core::manifest::Manifest;
use crate::util::process::ProcessBuilder;

/// A synthesized compiler invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileCommand {
    /// Program to run (`cl`, `g++`, ...)
    pub program: String,
    /// Arguments in order
    pub args: Vec<String>,
}

impl CompileCommand {
    /// Render the command as a single line.
    ///
    /// Arguments containing whitespace or quotes are wrapped in double quotes.
    pub fn to_command_string(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .map(quote_arg)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Build a process that runs this command in `cwd`.
    pub fn to_process(&self, cwd: &Path) -> ProcessBuilder {
        ProcessBuilder::new(&self.program).args(&self.args).cwd(cwd)
    }
}

impl fmt::Display for CompileCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_command_string())
    }
}

fn quote_arg(arg: &str) -> String {
    if arg.is_empty() {
        return "\"\"".to_string();
    }
    if arg.chars().any(|c| c.is_whitespace() || c == '"') {
        format!("\"{}\"", arg.replace('"', "\\\""))
    } else {
        arg.to_string()
    }
}

/// Synthesize the compile command for `manifest`.
///
/// Dependencies are looked up under `packages_dir/<name>`. A dependency that
/// is not installed contributes no flags.
pub fn synthesize(
    compiler: Compiler,
    manifest: &Manifest,
    packages_dir: &Path,
    raw_args: &[String],
) -> CompileCommand {
    let mut args = compiler.output_args(&manifest.name);

    for dep in &manifest.dependencies {
        let root = packages_dir.join(dep);
        let dirs = layout::scan(&root);

        if dirs.is_empty() {
            tracing::debug!("`{}` has no include or lib directories at {}", dep, root.display());
        }

        args.extend(dirs.get(DirRole::Include).iter().map(|d| compiler.include_arg(d)));
        args.extend(dirs.get(DirRole::Lib).iter().map(|d| compiler.libpath_arg(d)));
    }

    args.extend(raw_args.iter().cloned());

    CompileCommand {
        program: compiler.program().to_string(),
        args,
    }
}
