//! CLI definitions using clap.

use std::path::PathBuf;

use clap::builder::NonEmptyStringValueParser;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell as CompletionShell;
use modulo::util::ColorChoice;

/// Modulo - a local package manager for C/C++ projects
///
/// Global options go before the command so that everything after
/// `compile <compiler>` reaches the compiler untouched.
#[derive(Parser)]
#[command(name = "modulo")]
#[command(author, version, about, long_about = None)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Coloring: auto, always, never
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorChoice,

    /// Base directory for installed packages (defaults to ~/.modulo)
    #[arg(long, env = "MODULO_HOME", value_name = "DIR")]
    pub home: Option<PathBuf>,

    /// Registry document (defaults to ./registry.json)
    #[arg(long, env = "MODULO_REGISTRY", value_name = "FILE")]
    pub registry: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create cpkg.json in the current directory
    Init(InitArgs),

    /// Download and install a package from the registry
    Install(InstallArgs),

    /// Add a dependency to cpkg.json
    Add(AddArgs),

    /// Remove a dependency from cpkg.json
    Remove(RemoveArgs),

    /// List the dependencies in cpkg.json
    List,

    /// Compile the project against its installed dependencies
    Compile(CompileArgs),

    /// Show commands and available packages
    Help,

    /// Search the registry for packages
    Search(SearchArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct InitArgs {
    /// Project name
    #[arg(value_parser = NonEmptyStringValueParser::new())]
    pub name: String,
}

#[derive(Args)]
pub struct InstallArgs {
    /// Package name as listed in the registry
    pub name: String,
}

#[derive(Args)]
pub struct AddArgs {
    /// Package name
    pub name: String,
}

#[derive(Args)]
pub struct RemoveArgs {
    /// Package name
    pub name: String,
}

#[derive(Args)]
pub struct CompileArgs {
    /// Compiler to use: msvc, g++, clang++
    pub compiler: String,

    /// Print the command instead of running it
    #[arg(long)]
    pub dry_run: bool,

    /// Extra arguments passed to the compiler verbatim
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Substring to match against package names
    pub query: Option<String>,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: CompletionShell,
}
