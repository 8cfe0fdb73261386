//! Modulo CLI - a local package manager for C/C++ projects

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use modulo::core::{ManifestError, RegistryError};
use modulo::ops::{CompileError, InstallError};
use modulo::util::config::ConfigError;
use modulo::util::diagnostic::{self, suggestions, Diagnostic};
use modulo::util::{GlobalContext, Shell};

/// Options shared by every command.
pub struct GlobalOptions {
    pub shell: Shell,
    pub home: Option<std::path::PathBuf>,
    pub registry: Option<std::path::PathBuf>,
}

impl GlobalOptions {
    /// Build the global context, honoring `--home` and `--registry`.
    pub fn context(&self) -> Result<GlobalContext> {
        let ctx = match &self.home {
            Some(home) => {
                let cwd = std::env::current_dir()?;
                GlobalContext::with_home(cwd, home.clone())
            }
            None => GlobalContext::new()?,
        };

        Ok(match &self.registry {
            Some(path) => ctx.with_registry_path(path.clone()),
            None => ctx,
        })
    }
}

fn main() {
    // Argument errors exit with 1; --help and --version exit with 0.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    init_logging(&cli);

    let opts = GlobalOptions {
        shell: Shell::from_flags(cli.quiet, cli.verbose, cli.color),
        home: cli.home,
        registry: cli.registry,
    };

    match run(cli.command, &opts) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            diagnostic::emit(&report(&e), opts.shell.use_color());
            std::process::exit(1);
        }
    }
}

fn init_logging(cli: &Cli) {
    let default = if cli.verbose {
        "modulo=debug"
    } else if cli.quiet {
        "modulo=error"
    } else {
        "modulo=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn run(command: Commands, opts: &GlobalOptions) -> Result<i32> {
    match command {
        Commands::Init(args) => commands::init::execute(args, opts).map(|()| 0),
        Commands::Install(args) => commands::install::execute(args, opts).map(|()| 0),
        Commands::Add(args) => commands::add::execute(args, opts).map(|()| 0),
        Commands::Remove(args) => commands::remove::execute(args, opts).map(|()| 0),
        Commands::List => commands::list::execute(opts).map(|()| 0),
        Commands::Compile(args) => commands::compile::execute(args, opts),
        Commands::Help => commands::help::execute(opts).map(|()| 0),
        Commands::Search(args) => commands::search::execute(args, opts).map(|()| 0),
        Commands::Completions(args) => commands::completions::execute(args).map(|()| 0),
    }
}

/// Turn an error into a diagnostic with suggestions where they apply.
fn report(err: &anyhow::Error) -> Diagnostic {
    let mut diag = Diagnostic::from_error(err);
    for help in suggestions_for(err) {
        diag = diag.with_suggestion(help);
    }
    diag
}

fn suggestions_for(err: &anyhow::Error) -> Vec<String> {
    for cause in err.chain() {
        if let Some(e) = cause.downcast_ref::<CompileError>() {
            return match e {
                CompileError::UnsupportedCompiler(_) => {
                    vec![suggestions::UNSUPPORTED_COMPILER.to_string()]
                }
                CompileError::Manifest(e) => manifest_suggestions(e),
                CompileError::Config(e) => config_suggestions(e),
            };
        }
        if let Some(e) = cause.downcast_ref::<InstallError>() {
            match e {
                InstallError::Config(e) => return config_suggestions(e),
                InstallError::DownloadFailed { .. } => {
                    return vec![suggestions::FETCH_FAILED.to_string()]
                }
                // The registry error is the next cause in the chain.
                _ => continue,
            }
        }
        if let Some(e) = cause.downcast_ref::<ManifestError>() {
            return manifest_suggestions(e);
        }
        if let Some(e) = cause.downcast_ref::<RegistryError>() {
            return match e {
                RegistryError::Unavailable { .. } => vec![suggestions::NO_REGISTRY.to_string()],
                RegistryError::NotFound { suggestions: similar, .. } => similar
                    .iter()
                    .map(|name| format!("a package with a similar name exists: `{}`", name))
                    .chain(std::iter::once(suggestions::PACKAGE_NOT_FOUND.to_string()))
                    .collect(),
            };
        }
        if let Some(e) = cause.downcast_ref::<ConfigError>() {
            return config_suggestions(e);
        }
    }
    Vec::new()
}

fn manifest_suggestions(err: &ManifestError) -> Vec<String> {
    match err {
        ManifestError::NotFound { .. } => vec![suggestions::NO_MANIFEST.to_string()],
        ManifestError::Corrupt { .. } => vec![suggestions::CORRUPT_MANIFEST.to_string()],
        ManifestError::Storage { .. } => Vec::new(),
    }
}

fn config_suggestions(err: &ConfigError) -> Vec<String> {
    match err {
        ConfigError::NoHomeDirectory => vec![suggestions::NO_HOME.to_string()],
        _ => Vec::new(),
    }
}
