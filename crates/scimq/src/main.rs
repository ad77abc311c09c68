use clap::Parser;
use std::process::ExitCode;

mod cli;
mod commands;
mod logging;
mod output;

use cli::{Cli, Commands, ConfigCommands};
use commands::config::{self, Config};
use commands::{completions, parse, CommandContext, CommandError};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.quiet);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                let error_json = serde_json::json!({
                    "error": {
                        "code": error_code(&e),
                        "message": e.to_string(),
                        "offset": error_offset(&e),
                    }
                });
                eprintln!("{error_json:#}");
            } else {
                eprintln!("Error: {e}");
            }
            error_exit_code(&e)
        }
    }
}

fn run(cli: &Cli) -> commands::Result<()> {
    match &cli.command {
        Commands::Path { expression } => {
            let (ctx, _) = load_context(cli)?;
            parse::execute_path(&ctx, expression)
        }
        Commands::Filter { expression } => {
            let (ctx, _) = load_context(cli)?;
            parse::execute_filter(&ctx, expression)
        }
        Commands::Config { command } => match command {
            None | Some(ConfigCommands::Show) => {
                let path = config::get_config_path(cli.config.as_deref())?;
                let (ctx, config) = load_context(cli)?;
                config::execute_show(&ctx, &path, &config)
            }
            // Path and init must work even when the current file is broken.
            Some(ConfigCommands::Path) => {
                let path = config::get_config_path(cli.config.as_deref())?;
                let ctx = CommandContext::from_cli(cli, &Config::default());
                config::execute_path(&ctx, &path)
            }
            Some(ConfigCommands::Init { force }) => {
                let path = config::get_config_path(cli.config.as_deref())?;
                let ctx = CommandContext::from_cli(cli, &Config::default());
                config::execute_init(&ctx, &path, *force)
            }
        },
        Commands::Completions { shell } => Ok(completions::execute(*shell)?),
    }
}

/// Loads the config file and builds the command context from it.
fn load_context(cli: &Cli) -> commands::Result<(CommandContext, Config)> {
    let path = config::get_config_path(cli.config.as_deref())?;
    let config = config::load_config(&path)?;
    let ctx = CommandContext::from_cli(cli, &config);
    Ok((ctx, config))
}

/// Returns the error code string for JSON output.
fn error_code(e: &CommandError) -> &'static str {
    match e {
        CommandError::Parse(_) => "PARSE_ERROR",
        CommandError::Config(_) => "CONFIG_ERROR",
        CommandError::Io(_) => "IO_ERROR",
        CommandError::Json(_) => "JSON_ERROR",
    }
}

/// Returns the character offset of a parse error, if it has one.
fn error_offset(e: &CommandError) -> Option<usize> {
    match e {
        CommandError::Parse(parse_error) => parse_error.offset(),
        _ => None,
    }
}

/// Returns the exit code for an error.
fn error_exit_code(e: &CommandError) -> ExitCode {
    match e {
        CommandError::Parse(_) => ExitCode::from(1),
        CommandError::Json(_) => ExitCode::from(1),
        CommandError::Io(_) => ExitCode::from(3),
        CommandError::Config(_) => ExitCode::from(5),
    }
}
