//! Command implementations for the scimq CLI.
//!
//! This module contains the actual command handlers that are invoked by the CLI.

pub mod completions;
pub mod config;
pub mod parse;

use std::env;

use scim_query_rs::{ParseError, ParserConfig};

use crate::cli::Cli;
use config::Config;

/// Error type for command execution.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Path or filter parsing error.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for command execution.
pub type Result<T> = std::result::Result<T, CommandError>;

/// Context for command execution, containing common dependencies.
pub struct CommandContext {
    /// Whether to output JSON.
    pub json_output: bool,
    /// Whether to use colors.
    pub use_colors: bool,
    /// Whether to be quiet (errors only).
    pub quiet: bool,
    /// Parser settings from the config file and `--allow`.
    pub parser: ParserConfig,
}

impl CommandContext {
    /// Creates a new command context from CLI arguments and the loaded config.
    ///
    /// Colors are off when `--no-color` is given, when `NO_COLOR` is set, or
    /// when the config sets `output.color = false`.
    pub fn from_cli(cli: &Cli, config: &Config) -> Self {
        let use_colors = !cli.no_color
            && env::var_os("NO_COLOR").is_none()
            && config.output.color.unwrap_or(true);

        let parser = match &cli.allow {
            Some(chars) => config.parser.clone().allow_all(chars.chars()),
            None => config.parser.clone(),
        };

        Self {
            json_output: cli.json,
            use_colors,
            quiet: cli.quiet,
            parser,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_context_merges_allowed_chars() {
        let cli = Cli::parse_from(["scimq", "--allow", "#", "path", "a"]);
        let mut config = Config::default();
        config.parser = ParserConfig::default().allow(';');

        let ctx = CommandContext::from_cli(&cli, &config);
        assert!(ctx.parser.is_extended(';'));
        assert!(ctx.parser.is_extended('#'));
        assert!(!ctx.parser.is_extended('!'));
    }

    #[test]
    #[serial]
    fn test_context_colors() {
        let original = env::var_os("NO_COLOR");
        env::remove_var("NO_COLOR");

        let cli = Cli::parse_from(["scimq", "path", "a"]);
        let mut config = Config::default();
        let with_default = CommandContext::from_cli(&cli, &config).use_colors;

        config.output.color = Some(false);
        let with_config_off = CommandContext::from_cli(&cli, &config).use_colors;

        let no_color = Cli::parse_from(["scimq", "--no-color", "path", "a"]);
        let with_flag = CommandContext::from_cli(&no_color, &Config::default()).use_colors;

        env::set_var("NO_COLOR", "1");
        let with_env = CommandContext::from_cli(&cli, &Config::default()).use_colors;

        match original {
            Some(val) => env::set_var("NO_COLOR", val),
            None => env::remove_var("NO_COLOR"),
        }

        assert!(with_default);
        assert!(!with_config_off);
        assert!(!with_flag);
        assert!(!with_env);
    }
}
