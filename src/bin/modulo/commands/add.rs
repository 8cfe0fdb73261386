//! `modulo add` command

use anyhow::Result;

use crate::cli::AddArgs;
use crate::GlobalOptions;
use modulo::ops::add_dependency;
use modulo::util::Status;

pub fn execute(args: AddArgs, global_opts: &GlobalOptions) -> Result<()> {
    let shell = &global_opts.shell;
    let ctx = global_opts.context()?;

    let manifest = add_dependency(&ctx.manifest_path(), &args.name)?;

    let count = manifest
        .dependencies
        .iter()
        .filter(|dep| **dep == args.name)
        .count();
    if count > 1 {
        shell.warn(format!("`{}` is now listed {} times", args.name, count));
    }

    shell.status(Status::Added, &args.name);

    Ok(())
}
