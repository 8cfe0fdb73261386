//! `modulo install` command

use anyhow::Result;

use crate::cli::InstallArgs;
use crate::GlobalOptions;
use modulo::ops::install;
use modulo::sources::HttpFetcher;
use modulo::util::Status;

pub fn execute(args: InstallArgs, global_opts: &GlobalOptions) -> Result<()> {
    let shell = &global_opts.shell;
    let ctx = global_opts.context()?;

    shell.status(Status::Resolving, &args.name);

    let fetcher = HttpFetcher::new(&ctx.config().net)?;
    let result = install(&ctx, &args.name, &fetcher, shell)?;

    shell.status(
        Status::Installed,
        format!("{} ({})", result.name, result.dest.display()),
    );

    Ok(())
}
