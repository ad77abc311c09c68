//! Path and filter command implementations.

use scim_query_rs::{Filter, Parser, Path};

use super::{CommandContext, Result};
use crate::output;

/// Parses `expression` as an attribute path.
pub fn parse_path(ctx: &CommandContext, expression: &str) -> Result<Path> {
    Ok(Parser::new(&ctx.parser).parse_path(expression)?)
}

/// Parses `expression` as a filter.
pub fn parse_filter(ctx: &CommandContext, expression: &str) -> Result<Filter> {
    Ok(Parser::new(&ctx.parser).parse_filter(expression)?)
}

/// Executes the path command.
pub fn execute_path(ctx: &CommandContext, expression: &str) -> Result<()> {
    let path = parse_path(ctx, expression)?;

    if ctx.json_output {
        println!("{}", output::format_json(&path)?);
    } else if !ctx.quiet {
        print!("{}", output::format_path_tree(&path, ctx.use_colors));
    }

    Ok(())
}

/// Executes the filter command.
pub fn execute_filter(ctx: &CommandContext, expression: &str) -> Result<()> {
    let filter = parse_filter(ctx, expression)?;

    if ctx.json_output {
        println!("{}", output::format_json(&filter)?);
    } else if !ctx.quiet {
        print!("{}", output::format_filter_tree(&filter, ctx.use_colors));
    }

    Ok(())
}
