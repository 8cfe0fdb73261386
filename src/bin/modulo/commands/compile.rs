//! `modulo compile` command

use anyhow::Result;

use crate::cli::CompileArgs;
use crate::GlobalOptions;
use modulo::ops::{compile_command, run_compile};

/// Returns the compiler's exit code.
pub fn execute(args: CompileArgs, global_opts: &GlobalOptions) -> Result<i32> {
    let ctx = global_opts.context()?;
    let command = compile_command(&ctx, &args.compiler, &args.args)?;

    if args.dry_run {
        println!("{}", command);
        return Ok(0);
    }

    run_compile(&ctx, &command, &global_opts.shell)
}
