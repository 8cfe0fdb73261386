//! `modulo search` command

use anyhow::Result;

use crate::cli::SearchArgs;
use crate::GlobalOptions;
use modulo::core::Registry;

pub fn execute(args: SearchArgs, global_opts: &GlobalOptions) -> Result<()> {
    let ctx = global_opts.context()?;
    let registry = Registry::load(&ctx.registry_path())?;

    let results = match &args.query {
        Some(query) => registry.search(query),
        None => registry.names().collect(),
    };

    if results.is_empty() {
        if let Some(query) = &args.query {
            global_opts
                .shell
                .note(format!("no packages found matching '{}'", query));
        }
        return Ok(());
    }

    for name in results {
        println!("{}", name);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::cli::SearchArgs;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        search: SearchArgs,
    }

    #[test]
    fn test_search_without_query() {
        let cli = TestCli::parse_from(["test"]);
        assert!(cli.search.query.is_none());
    }

    #[test]
    fn test_search_with_query() {
        let cli = TestCli::parse_from(["test", "gl"]);
        assert_eq!(cli.search.query.as_deref(), Some("gl"));
    }
}
