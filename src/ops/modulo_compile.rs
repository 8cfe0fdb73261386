//! Implementation of `modulo compile`.

use thiserror::Error;

use crate::builder::{synthesize, CompileCommand, Compiler, UnsupportedCompiler};
use crate::core::manifest::{Manifest, ManifestError};
use crate::util::config::ConfigError;
use crate::util::process::find_executable;
use crate::util::{GlobalContext, Shell, Status};

/// Errors from compile command synthesis.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error(transparent)]
    UnsupportedCompiler(#[from] UnsupportedCompiler),

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Build the compile command for the project in `ctx`.
///
/// The compiler identifier is validated before the manifest is read or any
/// package directory is scanned.
pub fn compile_command(
    ctx: &GlobalContext,
    compiler: &str,
    raw_args: &[String],
) -> Result<CompileCommand, CompileError> {
    let compiler: Compiler = compiler.parse()?;

    let manifest = Manifest::load(&ctx.manifest_path())?;
    let packages_dir = ctx.packages_dir()?;

    tracing::debug!(
        "synthesizing {} command for `{}` with {} dependencies",
        compiler,
        manifest.name,
        manifest.dependencies.len()
    );

    Ok(synthesize(compiler, &manifest, &packages_dir, raw_args))
}

/// Run a synthesized command in the project directory.
///
/// Returns the command's exit code. A command killed by a signal reports 1.
pub fn run_compile(
    ctx: &GlobalContext,
    command: &CompileCommand,
    shell: &Shell,
) -> anyhow::Result<i32> {
    if find_executable(&command.program).is_none() {
        shell.warn(format!("`{}` was not found in PATH", command.program));
    }

    shell.status(Status::Compiling, command);

    let status = command.to_process(ctx.cwd()).status()?;
    let code = status.code().unwrap_or(1);
    if !status.success() {
        tracing::debug!("`{}` exited with {}", command.program, code);
    }
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::{add_dependency, init_project};
    use crate::test_support::TestEnv;
    use std::path::PathBuf;

    #[test]
    fn test_unsupported_compiler_checked_first() {
        // Neither the project directory nor the home exists.
        let ctx = GlobalContext::with_home(
            PathBuf::from("/nonexistent/project"),
            PathBuf::from("/nonexistent/home"),
        );

        let err = compile_command(&ctx, "tcc", &[]).unwrap_err();
        match err {
            CompileError::UnsupportedCompiler(e) => assert_eq!(e.name, "tcc"),
            other => panic!("expected UnsupportedCompiler, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_manifest() {
        let env = TestEnv::new();

        let err = compile_command(&env.ctx, "g++", &[]).unwrap_err();
        assert!(matches!(
            err,
            CompileError::Manifest(ManifestError::NotFound { .. })
        ));
    }

    #[test]
    fn test_compile_command_from_project() {
        let env = TestEnv::new();
        let manifest_path = env.ctx.manifest_path();
        init_project(&manifest_path, "demo").unwrap();
        add_dependency(&manifest_path, "zlib").unwrap();
        add_dependency(&manifest_path, "absent").unwrap();
        let zlib = env.install_layout("zlib", &["include", "lib"]);

        let raw = vec!["main.cpp".to_string()];
        let cmd = compile_command(&env.ctx, "msvc", &raw).unwrap();

        let include = std::path::absolute(zlib.join("include")).unwrap();
        let lib = std::path::absolute(zlib.join("lib")).unwrap();
        assert_eq!(cmd.program, "cl");
        assert_eq!(
            cmd.args,
            vec![
                "/Fe:demo".to_string(),
                format!("/I{}", include.display()),
                format!("/LIBPATH:{}", lib.display()),
                "main.cpp".to_string(),
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_run_compile_propagates_exit_code() {
        use crate::util::shell::{ColorChoice, Verbosity};

        let env = TestEnv::new();
        let shell = Shell::new(Verbosity::Quiet, ColorChoice::Never);

        let failing = CompileCommand {
            program: "sh".to_string(),
            args: vec!["-c".to_string(), "exit 3".to_string()],
        };
        assert_eq!(run_compile(&env.ctx, &failing, &shell).unwrap(), 3);

        let ok = CompileCommand {
            program: "sh".to_string(),
            args: vec!["-c".to_string(), "exit 0".to_string()],
        };
        assert_eq!(run_compile(&env.ctx, &ok, &shell).unwrap(), 0);
    }

    #[test]
    fn test_run_compile_missing_program() {
        use crate::util::shell::{ColorChoice, Verbosity};

        let env = TestEnv::new();
        let shell = Shell::new(Verbosity::Quiet, ColorChoice::Never);
        let cmd = CompileCommand {
            program: "modulo-no-such-compiler".to_string(),
            args: vec![],
        };

        assert!(run_compile(&env.ctx, &cmd, &shell).is_err());
    }
}
