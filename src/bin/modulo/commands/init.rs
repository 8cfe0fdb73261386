//! `modulo init` command

use anyhow::Result;

use crate::cli::InitArgs;
use crate::GlobalOptions;
use modulo::ops::init_project;
use modulo::util::Status;

pub fn execute(args: InitArgs, global_opts: &GlobalOptions) -> Result<()> {
    let shell = &global_opts.shell;
    let ctx = global_opts.context()?;
    let manifest_path = ctx.manifest_path();

    if manifest_path.exists() {
        shell.warn(format!("overwriting existing {}", manifest_path.display()));
    }

    let manifest = init_project(&manifest_path, &args.name)?;

    shell.status(
        Status::Created,
        format!("project `{}` ({})", manifest.name, manifest_path.display()),
    );

    Ok(())
}
