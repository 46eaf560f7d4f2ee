//! `flightdeck launch`: every unit in one process

use super::{hud, release, watch};
use crate::console::CliConsole;
use crate::ui::Dashboard;
use anyhow::{Context, Result};
use flightdeck_core::player::ProfileKind;
use flightdeck_core::watcher::StatusBoard;
use flightdeck_core::{FlightdeckConfig, ServiceClient};
use flightdeck_snapshot::{LocalSnapshotStore, SnapshotStore};
use std::io::ErrorKind;
use std::path::Path;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Remove artifacts left over from a previous run
pub async fn clear_stale_artifacts(config: &FlightdeckConfig) -> Result<()> {
    let store = LocalSnapshotStore::new(&config.release.snapshot_path);
    if store.clear().await? {
        info!("Removed stale snapshot {}", store.location().display());
    }
    remove_if_present(&config.watcher.formula_path).await
}

async fn remove_if_present(path: &Path) -> Result<()> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => {
            info!("Removed stale {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).with_context(|| format!("cannot remove {}", path.display())),
    }
}

pub async fn run(config: &FlightdeckConfig, verbose: bool, cancel: CancellationToken) -> Result<()> {
    let console = CliConsole::new(verbose);
    clear_stale_artifacts(config).await?;

    let service = ServiceClient::from_config(&config.service)?;
    let scheduler = release::build_scheduler(config, service.uploader())?;
    let board = StatusBoard::new();
    let watcher = watch::build_watcher(config, board.clone())?;

    let release_task = tokio::spawn({
        let cancel = cancel.clone();
        async move { scheduler.run(cancel).await }
    });
    let watcher_task = tokio::spawn(watcher.run(cancel.clone()));

    let dashboard = Dashboard::new(config.hud.frame_period())
        .with_player(hud::build_player(config, ProfileKind::Altitude)?)
        .with_player(hud::build_player(config, ProfileKind::Tracking)?)
        .with_status(board.subscribe());
    let ui_result = dashboard.run(cancel.clone()).await;

    cancel.cancel();
    watcher_task.abort();
    let report = release_task
        .await
        .context("release task panicked")?
        .context("release stopped")?;

    ui_result?;
    release::print_report(&console, &report);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_clear_stale_artifacts_removes_both_files() {
        let dir = TempDir::new().unwrap();
        let mut config = FlightdeckConfig::default();
        config.release.snapshot_path = dir.path().join("input_data.json");
        config.watcher.formula_path = dir.path().join("formula_from_srv.txt");

        std::fs::write(&config.release.snapshot_path, r#"{"e":[],"de":[]}"#).unwrap();
        std::fs::write(&config.watcher.formula_path, "V = e^2").unwrap();

        clear_stale_artifacts(&config).await.unwrap();
        assert!(!config.release.snapshot_path.exists());
        assert!(!config.watcher.formula_path.exists());

        // Nothing left to remove
        clear_stale_artifacts(&config).await.unwrap();
    }
}
