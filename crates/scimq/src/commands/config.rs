//! Config command implementation.
//!
//! View and create configuration settings.
//! Config file is located at ~/.config/scimq/config.toml.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use owo_colors::OwoColorize;
use scim_query_rs::ParserConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{CommandContext, CommandError, Result};

/// Current config file version. Increment when making breaking changes to schema.
const CONFIG_VERSION: u32 = 1;

/// Environment variable overriding the config file location.
const CONFIG_ENV: &str = "SCIMQ_CONFIG";

/// Default config file contents.
const DEFAULT_CONFIG: &str = r##"# scimq - SCIM path and filter parser configuration

# Config schema version (do not modify)
version = 1

# Parser settings
[parser]
# Extra characters accepted in attribute names
# extended = [";", "#"]

# Output preferences
[output]
# color = true    # Enable colors (respects NO_COLOR env)
"##;

/// Configuration file structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Config schema version.
    /// Defaults to current version when not present in file.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Parser settings.
    #[serde(default)]
    pub parser: ParserConfig,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Returns the current config version (used by serde default).
fn default_version() -> u32 {
    CONFIG_VERSION
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            parser: ParserConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

/// Output configuration.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Enable colors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,
}

/// Gets the config file path.
///
/// The location is chosen in this order:
/// 1. `--config` command line flag
/// 2. `SCIMQ_CONFIG` environment variable
/// 3. `$XDG_CONFIG_HOME/scimq/config.toml`
/// 4. `~/.config/scimq/config.toml`
pub fn get_config_path(flag: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = flag {
        return Ok(path.to_path_buf());
    }

    if let Ok(path) = env::var(CONFIG_ENV) {
        return Ok(PathBuf::from(path));
    }

    if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg_config).join("scimq").join("config.toml"));
    }

    BaseDirs::new()
        .map(|dirs| {
            dirs.home_dir()
                .join(".config")
                .join("scimq")
                .join("config.toml")
        })
        .ok_or_else(|| CommandError::Config("Could not determine config directory".to_string()))
}

/// Loads the configuration from `path`.
///
/// A missing file yields the default configuration.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        debug!(path = %path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path)
        .map_err(|e| CommandError::Config(format!("Failed to read config: {}", e)))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| CommandError::Config(format!("Failed to parse config: {}", e)))?;

    if config.version > CONFIG_VERSION {
        return Err(CommandError::Config(format!(
            "Unsupported config version {} (this scimq understands up to {})",
            config.version, CONFIG_VERSION
        )));
    }

    debug!(
        path = %path.display(),
        extended = config.parser.extended().len(),
        "loaded config"
    );
    Ok(config)
}

/// Executes the config show command.
///
/// `ctx.parser` already includes characters added with `--allow`.
pub fn execute_show(ctx: &CommandContext, path: &Path, config: &Config) -> Result<()> {
    let effective = Config {
        version: config.version,
        parser: ctx.parser.clone(),
        output: OutputConfig {
            color: config.output.color,
        },
    };

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
            "config": effective,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        let header = "Configuration";
        if ctx.use_colors {
            println!("{}\n", header.green().bold());
        } else {
            println!("{}\n", header);
        }

        println!("File: {}", path.display());
        println!("Exists: {}\n", path.exists());

        println!("[parser]");
        let extended: Vec<String> = effective
            .parser
            .extended()
            .iter()
            .map(|c| format!("{c:?}"))
            .collect();
        if extended.is_empty() {
            println!("  extended: (none)");
        } else {
            println!("  extended: {}", extended.join(" "));
        }

        println!("\n[output]");
        if let Some(color) = effective.output.color {
            println!("  color: {}", color);
        }
    }

    Ok(())
}

/// Executes the config path command.
pub fn execute_path(ctx: &CommandContext, path: &Path) -> Result<()> {
    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", path.display());
    }

    Ok(())
}

/// Executes the config init command.
///
/// Refuses to replace an existing file unless `force` is set.
pub fn execute_init(ctx: &CommandContext, path: &Path, force: bool) -> Result<()> {
    write_default_config(path, force)?;

    if ctx.json_output {
        let output = serde_json::json!({
            "status": "created",
            "path": path.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        println!("Created default config at: {}", path.display());
    }

    Ok(())
}

/// Writes the commented default config to `path`.
fn write_default_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(CommandError::Config(format!(
            "Config file already exists at {} (use --force to overwrite)",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            CommandError::Config(format!("Failed to create config directory: {}", e))
        })?;
    }

    fs::write(path, DEFAULT_CONFIG)
        .map_err(|e| CommandError::Config(format!("Failed to write config: {}", e)))?;

    Ok(())
}
