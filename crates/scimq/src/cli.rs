//! CLI argument parsing using clap derive macros.
//!
//! This module defines the command-line interface for scimq.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// scimq - Parse SCIM attribute paths and filter expressions
#[derive(Parser, Debug)]
#[command(name = "scimq")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output (show debug information)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Config file to use (default: ~/.config/scimq/config.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Extra characters to accept in attribute names (e.g. ";#")
    #[arg(long, global = true, value_name = "CHARS")]
    pub allow: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse an attribute path
    #[command(alias = "p")]
    Path {
        /// Path expression (e.g., 'emails[type eq "work"].value')
        expression: String,
    },

    /// Parse a filter expression
    #[command(alias = "f")]
    Filter {
        /// Filter expression (e.g., 'title pr and userType eq "Employee"')
        expression: String,
    },

    /// View and create configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Shell types for completions
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,

    /// Print config file path
    Path,

    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_filter_command() {
        let cli = Cli::parse_from(["scimq", "filter", "userName pr"]);
        if let Commands::Filter { expression } = cli.command {
            assert_eq!(expression, "userName pr");
        } else {
            panic!("Expected Filter command");
        }
    }

    #[test]
    fn test_path_alias() {
        let cli = Cli::parse_from(["scimq", "p", "name.givenName"]);
        assert!(matches!(cli.command, Commands::Path { .. }));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "scimq",
            "filter",
            "a pr",
            "--json",
            "--allow",
            ";#",
            "--config",
            "/tmp/scimq.toml",
        ]);
        assert!(cli.json);
        assert_eq!(cli.allow.as_deref(), Some(";#"));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/scimq.toml")));
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["scimq", "-v", "-q", "path", "a"]).is_err());
    }

    #[test]
    fn test_config_subcommands() {
        let cli = Cli::parse_from(["scimq", "config", "init", "--force"]);
        if let Commands::Config {
            command: Some(ConfigCommands::Init { force }),
        } = cli.command
        {
            assert!(force);
        } else {
            panic!("Expected Config Init command");
        }

        let cli = Cli::parse_from(["scimq", "config"]);
        assert!(matches!(cli.command, Commands::Config { command: None }));
    }

    #[test]
    fn test_completions() {
        let cli = Cli::parse_from(["scimq", "completions", "zsh"]);
        if let Commands::Completions { shell } = cli.command {
            assert!(matches!(shell, Shell::Zsh));
        } else {
            panic!("Expected Completions command");
        }
    }

    #[test]
    fn test_missing_expression() {
        assert!(Cli::try_parse_from(["scimq", "filter"]).is_err());
    }
}
