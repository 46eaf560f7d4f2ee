//! CLI argument definitions using clap
//!
//! - flightdeck release              # Release the dataset to the service
//! - flightdeck hud altitude         # Altitude HUD
//! - flightdeck hud tracking         # Tracking error HUD
//! - flightdeck watch                # Status surface for the verdict
//! - flightdeck launch               # Everything at once
//! - flightdeck config init|show     # Configuration utilities

use clap::{Parser, Subcommand, ValueEnum};
use flightdeck_core::config::ConfigOverrides;
use flightdeck_core::player::ProfileKind;
use std::path::PathBuf;

/// Default configuration file name used across all CLI commands.
pub const DEFAULT_CONFIG_FILE: &str = "flightdeck.toml";

#[derive(Parser)]
#[command(name = "flightdeck")]
#[command(about = "Flightdeck - replay recorded flight data against a virtual clock")]
#[command(
    long_about = r#"Flightdeck - replay recorded flight data against a virtual clock

USAGE:
  flightdeck launch                 # Scheduler, both HUDs and the status panel
  flightdeck release                # Release snapshots to the analysis service
  flightdeck hud altitude           # Altitude HUD only
  flightdeck hud tracking           # Tracking error HUD only
  flightdeck watch                  # Status surface only

UTILITY COMMANDS:
  flightdeck config init            # Create config file
  flightdeck config show            # Show effective config"#
)]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Source dataset (CSV)
    #[arg(long, global = true)]
    pub dataset: Option<PathBuf>,

    /// Analysis service base URL
    #[arg(long, global = true)]
    pub service_url: Option<String>,

    /// Virtual seconds per wall-clock second
    #[arg(long, global = true)]
    pub scale: Option<f64>,

    /// Do not contact the analysis service
    #[arg(long, global = true)]
    pub offline: bool,

    /// Enable verbose output
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Command line values that override file and environment settings
    pub fn overrides(&self) -> ConfigOverrides {
        let interval = match &self.command {
            Commands::Release { interval } | Commands::Launch { interval } => *interval,
            _ => None,
        };
        ConfigOverrides {
            dataset: self.dataset.clone(),
            service_url: self.service_url.clone(),
            scale: self.scale,
            interval,
            log_level: self.verbose.then(|| "debug".to_string()),
            offline: self.offline,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Release the dataset incrementally and upload each snapshot
    Release {
        /// Virtual seconds between releases
        #[arg(long)]
        interval: Option<f64>,
    },

    /// Play one HUD in the terminal
    Hud {
        #[arg(value_enum)]
        kind: HudKind,
    },

    /// Watch the snapshot and show the analysis verdict
    Watch {
        /// Log status changes instead of drawing the status surface
        #[arg(long)]
        headless: bool,
    },

    /// Clear stale artifacts, then run everything in one dashboard
    Launch {
        /// Virtual seconds between releases
        #[arg(long)]
        interval: Option<f64>,
    },

    /// Manage configuration files
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HudKind {
    Altitude,
    Tracking,
}

impl From<HudKind> for ProfileKind {
    fn from(kind: HudKind) -> Self {
        match kind {
            HudKind::Altitude => ProfileKind::Altitude,
            HudKind::Tracking => ProfileKind::Tracking,
        }
    }
}

#[derive(Subcommand, Clone)]
pub enum ConfigAction {
    /// Display the effective configuration
    Show,

    /// Validate the configuration
    Validate,

    /// Create a new configuration file with defaults
    Init {
        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "flightdeck",
            "release",
            "--interval",
            "2",
            "--scale",
            "10",
            "--offline",
        ])
        .unwrap();

        let overrides = cli.overrides();
        assert_eq!(overrides.interval, Some(2.0));
        assert_eq!(overrides.scale, Some(10.0));
        assert!(overrides.offline);
        assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG_FILE));
    }

    #[test]
    fn test_hud_kind() {
        let cli = Cli::try_parse_from(["flightdeck", "hud", "tracking"]).unwrap();
        match cli.command {
            Commands::Hud { kind } => assert_eq!(ProfileKind::from(kind), ProfileKind::Tracking),
            _ => panic!("expected hud"),
        }
    }

    #[test]
    fn test_verbose_sets_debug() {
        let cli = Cli::try_parse_from(["flightdeck", "-v", "watch", "--headless"]).unwrap();
        assert_eq!(cli.overrides().log_level.as_deref(), Some("debug"));
    }
}
