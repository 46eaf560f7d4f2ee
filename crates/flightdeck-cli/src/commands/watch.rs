//! `flightdeck watch`

use crate::console::CliConsole;
use crate::ui::Dashboard;
use anyhow::Result;
use flightdeck_core::certificate::render_formula_text;
use flightdeck_core::watcher::{
    SnapshotWatcher, StatusBoard, StatusView, WatcherContext, WatcherSettings,
};
use flightdeck_core::{FlightdeckConfig, ServiceClient};
use flightdeck_snapshot::LocalSnapshotStore;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Watcher over the configured snapshot artifact, publishing on `board`
pub fn build_watcher(config: &FlightdeckConfig, board: StatusBoard) -> Result<SnapshotWatcher> {
    let service = ServiceClient::from_config(&config.service)?;
    let store = Arc::new(LocalSnapshotStore::new(&config.release.snapshot_path));
    let context =
        WatcherContext::new(store, service.analysis(), board, &config.watcher.formula_path);
    Ok(SnapshotWatcher::new(context, WatcherSettings::from(&config.watcher)))
}

pub async fn run(config: &FlightdeckConfig, headless: bool, cancel: CancellationToken) -> Result<()> {
    let board = StatusBoard::new();
    let watcher = build_watcher(config, board.clone())?;
    let task = tokio::spawn(watcher.run(cancel.clone()));

    if headless {
        print_changes(&board, &cancel).await;
    } else {
        Dashboard::new(config.watcher.poll_period)
            .with_status(board.subscribe())
            .run(cancel.clone())
            .await?;
    }

    cancel.cancel();
    task.await??;
    Ok(())
}

async fn print_changes(board: &StatusBoard, cancel: &CancellationToken) {
    let console = CliConsole::new(true);
    let mut rx = board.subscribe();

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
            }
        }

        match rx.borrow_and_update().clone() {
            StatusView::Hidden => {}
            StatusView::Waiting { rows } => {
                console.info(&format!("Waiting: {rows} rows received, analysis running"))
            }
            StatusView::Failure => console.error("ALERT: controller may be unstable"),
            StatusView::Success { formula } => {
                console.success("Controller is proved stable");
                console.field("Certificate", render_formula_text(&formula));
            }
        }
    }
}
