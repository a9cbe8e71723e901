//! Configuration management commands

use crate::console::CliConsole;
use anyhow::Context;
use colored::*;
use std::path::{Path, PathBuf};
use steady_core::config::{default_config_path, load_settings};

/// Show the effective configuration with the token redacted
pub fn show(config_path: Option<&Path>) -> anyhow::Result<()> {
    let console = CliConsole::new(true);
    console.print_header("Configuration");

    let path: Option<PathBuf> = config_path.map(Path::to_path_buf).or_else(default_config_path);
    match &path {
        Some(path) if path.exists() => {
            println!("{} {}", "Config file:".bold(), path.display());
        }
        Some(path) => {
            console.warn(&format!("Configuration file not found: {}", path.display()));
            console.info("Using defaults and environment");
        }
        None => console.warn("No configuration directory available"),
    }

    let settings = load_settings(path.as_deref())?;
    let rendered = toml::to_string_pretty(&settings.redacted())
        .context("Failed to render configuration")?;

    println!();
    println!("{}", rendered.trim_end());
    Ok(())
}
