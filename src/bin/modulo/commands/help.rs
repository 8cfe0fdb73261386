//! `modulo help` command
//!
//! Prints the command summary followed by every package in the registry.

use anyhow::Result;
use clap::CommandFactory;

use crate::cli::Cli;
use crate::GlobalOptions;
use modulo::core::Registry;

pub fn execute(global_opts: &GlobalOptions) -> Result<()> {
    let mut cmd = Cli::command();
    println!("{}", cmd.render_help());

    let ctx = global_opts.context()?;
    let registry = Registry::load(&ctx.registry_path())?;

    println!("Available packages:");
    for name in registry.names() {
        println!("  {}", name);
    }

    Ok(())
}
