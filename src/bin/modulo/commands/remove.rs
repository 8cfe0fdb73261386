//! `modulo remove` command

use anyhow::Result;

use crate::cli::RemoveArgs;
use crate::GlobalOptions;
use modulo::ops::{remove_dependency, RemoveResult};
use modulo::util::Status;

pub fn execute(args: RemoveArgs, global_opts: &GlobalOptions) -> Result<()> {
    let shell = &global_opts.shell;
    let ctx = global_opts.context()?;

    match remove_dependency(&ctx.manifest_path(), &args.name)? {
        RemoveResult::Removed { name } => {
            shell.status(Status::Removed, name);
        }
        RemoveResult::NotFound { name } => {
            shell.status(
                Status::Warning,
                format!("dependency `{}` not found in cpkg.json", name),
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::cli::RemoveArgs;
    use clap::Parser;

    fn parse_remove_args(args: &[&str]) -> RemoveArgs {
        #[derive(Parser)]
        struct TestCli {
            #[command(flatten)]
            remove: RemoveArgs,
        }
        TestCli::parse_from(args).remove
    }

    // =========================================================================
    // Package Name Tests
    // =========================================================================

    #[test]
    fn test_remove_simple_package_name() {
        assert_eq!(parse_remove_args(&["test", "openssl"]).name, "openssl");
    }

    #[test]
    fn test_remove_package_name_with_underscore() {
        assert_eq!(parse_remove_args(&["test", "my_package"]).name, "my_package");
    }

    #[test]
    fn test_remove_different_packages() {
        let names: Vec<_> = ["zlib", "openssl", "libcurl"]
            .iter()
            .map(|n| parse_remove_args(&["test", n]).name)
            .collect();

        assert_eq!(names, vec!["zlib", "openssl", "libcurl"]);
    }
}
