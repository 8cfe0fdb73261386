//! `modulo list` command

use anyhow::Result;

use crate::GlobalOptions;
use modulo::ops::list_dependencies;

pub fn execute(global_opts: &GlobalOptions) -> Result<()> {
    let ctx = global_opts.context()?;
    let deps = list_dependencies(&ctx.manifest_path())?;

    if !global_opts.shell.is_quiet() {
        println!("Dependencies:");
    }
    for dep in &deps {
        println!("{}", dep);
    }

    Ok(())
}
