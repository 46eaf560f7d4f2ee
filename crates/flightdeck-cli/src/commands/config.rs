//! Configuration management commands

use crate::args::ConfigAction;
use crate::console::CliConsole;
use anyhow::{bail, Context, Result};
use colored::*;
use flightdeck_core::config::{load_config, ConfigOverrides};
use flightdeck_core::FlightdeckConfig;
use std::path::Path;

pub async fn run(action: ConfigAction, config_file: &Path, overrides: ConfigOverrides) -> Result<()> {
    match action {
        ConfigAction::Show => show(config_file, overrides),
        ConfigAction::Validate => validate(config_file, overrides),
        ConfigAction::Init { force } => init(config_file, force).await,
    }
}

/// Show the effective configuration
fn show(config_file: &Path, overrides: ConfigOverrides) -> Result<()> {
    let console = CliConsole::new(true);
    console.print_header("Configuration");

    if !config_file.exists() {
        console.warn(&format!(
            "Configuration file not found: {}",
            config_file.display()
        ));
        console.info("Using defaults, environment and command line values");
    }

    let config = load_config(config_file, overrides)?;
    let rendered = toml::to_string_pretty(&config).context("cannot render configuration")?;
    println!("{rendered}");
    Ok(())
}

/// Validate configuration
fn validate(config_file: &Path, overrides: ConfigOverrides) -> Result<()> {
    let console = CliConsole::new(true);
    console.print_header("Configuration Validation");

    let config = match load_config(config_file, overrides) {
        Ok(config) => config,
        Err(e) => {
            console.error(&format!("Configuration validation failed: {e}"));
            return Err(e.into());
        }
    };
    console.success("Configuration is valid");

    console.field("Dataset", config.dataset.path.display().to_string().cyan());
    console.field(
        "Release interval",
        format!("{}s", config.release.interval).yellow(),
    );
    console.field("Scale", config.release.scale);
    console.field("HUD window", format!("{}s @ {} fps", config.hud.window, config.hud.fps));
    let service = if config.service.enabled {
        config.service.base_url.green()
    } else {
        "offline".dimmed()
    };
    console.field("Service", service);
    Ok(())
}

/// Initialize a new configuration file
async fn init(config_file: &Path, force: bool) -> Result<()> {
    let console = CliConsole::new(true);
    console.print_header("Configuration Initialization");

    if config_file.exists() && !force {
        console.info("Use --force to overwrite");
        bail!(
            "Configuration file already exists: {}",
            config_file.display()
        );
    }

    let rendered = render_default(config_file)?;
    tokio::fs::write(config_file, rendered)
        .await
        .with_context(|| format!("cannot write {}", config_file.display()))?;

    console.success(&format!(
        "Created configuration file: {}",
        config_file.display()
    ));
    Ok(())
}

/// Default configuration in the format implied by the file extension
fn render_default(config_file: &Path) -> Result<String> {
    let config = FlightdeckConfig::default();
    let is_json = config_file
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        Ok(serde_json::to_string_pretty(&config)?)
    } else {
        Ok(toml::to_string_pretty(&config)?)
    }
}
