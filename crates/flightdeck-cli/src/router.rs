//! Command routing logic for CLI

use crate::args::{Cli, Commands};
use crate::commands;
use crate::logging::{self, LogTarget};
use crate::signal_handler::SignalHandler;
use anyhow::{Context, Result};
use flightdeck_core::config::load_config;
use tokio_util::sync::CancellationToken;

/// Where logs go while a command runs
fn log_target(command: &Commands) -> LogTarget {
    match command {
        Commands::Hud { .. } | Commands::Launch { .. } => LogTarget::File,
        Commands::Watch { headless } if !*headless => LogTarget::File,
        _ => LogTarget::Stderr,
    }
}

/// Route CLI commands to their respective handlers
pub async fn route(cli: Cli) -> Result<()> {
    let overrides = cli.overrides();

    if let Commands::Config { action } = &cli.command {
        return commands::config::run(action.clone(), &cli.config, overrides).await;
    }

    let config = load_config(&cli.config, overrides)
        .with_context(|| format!("invalid configuration ({})", cli.config.display()))?;
    logging::init(&config.logging, log_target(&cli.command))?;
    tracing::debug!("Effective configuration: {:?}", config);

    let cancel = CancellationToken::new();
    let mut signals = SignalHandler::new(cancel.clone());
    signals.start().context("cannot install Ctrl+C handler")?;

    let result = match cli.command {
        Commands::Release { .. } => commands::release::run(&config, cli.verbose, cancel).await,
        Commands::Hud { kind } => commands::hud::run(&config, kind.into(), cancel).await,
        Commands::Watch { headless } => commands::watch::run(&config, headless, cancel).await,
        Commands::Launch { .. } => commands::launch::run(&config, cli.verbose, cancel).await,
        Commands::Config { .. } => Ok(()),
    };

    signals.stop();
    if let Err(e) = &result {
        tracing::error!("{:#}", e);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_tui_commands_log_to_file() {
        let target = |args: &[&str]| log_target(&Cli::try_parse_from(args).unwrap().command);

        assert_eq!(target(&["flightdeck", "launch"]), LogTarget::File);
        assert_eq!(target(&["flightdeck", "hud", "altitude"]), LogTarget::File);
        assert_eq!(target(&["flightdeck", "watch"]), LogTarget::File);
        assert_eq!(target(&["flightdeck", "watch", "--headless"]), LogTarget::Stderr);
        assert_eq!(target(&["flightdeck", "release"]), LogTarget::Stderr);
    }
}
