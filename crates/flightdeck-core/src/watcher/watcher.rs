//! Snapshot change detection and debounced status queries

use super::debounce::Debouncer;
use super::status::StatusBoard;
use crate::config::WatcherConfig;
use crate::error::{FlightdeckError, FlightdeckResult};
use crate::service::{AnalysisService, AnalysisStatus};
use flightdeck_snapshot::{ModificationMarker, SnapshotStore};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Runtime settings for the watcher
#[derive(Debug, Clone, PartialEq)]
pub struct WatcherSettings {
    pub poll_period: Duration,
    pub debounce_delay: Duration,
    pub min_rows: usize,
}

impl From<&WatcherConfig> for WatcherSettings {
    fn from(config: &WatcherConfig) -> Self {
        Self {
            poll_period: config.poll_period,
            debounce_delay: config.debounce_delay,
            min_rows: config.min_rows,
        }
    }
}

/// State shared by the poll loop and the debounced queries it fires
#[derive(Clone)]
pub struct WatcherContext {
    store: Arc<dyn SnapshotStore>,
    service: Arc<dyn AnalysisService>,
    board: StatusBoard,
    formula_path: PathBuf,
}

impl WatcherContext {
    pub fn new(
        store: Arc<dyn SnapshotStore>,
        service: Arc<dyn AnalysisService>,
        board: StatusBoard,
        formula_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            store,
            service,
            board,
            formula_path: formula_path.into(),
        }
    }

    pub fn board(&self) -> &StatusBoard {
        &self.board
    }

    /// Ask the service for its verdict once and update the status surface
    pub async fn query_status_once(&self) -> FlightdeckResult<AnalysisStatus> {
        let status = self.service.status().await?;
        info!("Analysis status: {}", status.as_str());

        match status {
            AnalysisStatus::Fail => {
                self.board.fail();
            }
            AnalysisStatus::Success => {
                let formula = self.service.formula().await?;
                if !formula.trim().is_empty() {
                    write_formula(&self.formula_path, &formula).await?;
                }
                self.board.succeed(read_formula(&self.formula_path).await?);
            }
            AnalysisStatus::Unknown | AnalysisStatus::Pending => {
                debug!("No verdict yet");
            }
        }
        Ok(status)
    }
}

async fn write_formula(path: &Path, formula: &str) -> FlightdeckResult<()> {
    tokio::fs::write(path, formula).await.map_err(|e| {
        FlightdeckError::io_with_path(
            format!("Failed to write formula: {}", e),
            path.display().to_string(),
        )
    })
}

/// Last stored formula, trimmed; empty when none was ever stored
async fn read_formula(path: &Path) -> FlightdeckResult<String> {
    match tokio::fs::read_to_string(path).await {
        Ok(text) => Ok(text.trim().to_string()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(FlightdeckError::io_with_path(
            format!("Failed to read formula: {}", e),
            path.display().to_string(),
        )),
    }
}

/// Polls the snapshot artifact and fires one query per burst of updates
pub struct SnapshotWatcher {
    context: WatcherContext,
    settings: WatcherSettings,
    debouncer: Debouncer,
    last_marker: Option<ModificationMarker>,
}

impl SnapshotWatcher {
    pub fn new(context: WatcherContext, settings: WatcherSettings) -> Self {
        let debouncer = Debouncer::new(settings.debounce_delay);
        Self {
            context,
            settings,
            debouncer,
            last_marker: None,
        }
    }

    pub fn context(&self) -> &WatcherContext {
        &self.context
    }

    /// Check the artifact once. Returns the row count when a change was
    /// observed and read successfully.
    pub async fn poll_once(&mut self) -> FlightdeckResult<Option<usize>> {
        let Some(marker) = self.context.store.marker().await? else {
            return Ok(None);
        };
        if self.last_marker == Some(marker) {
            return Ok(None);
        }
        self.last_marker = Some(marker);

        let rows = match self.context.store.summary().await {
            Ok(summary) => summary.rows,
            Err(e) => {
                return Err(FlightdeckError::malformed_artifact(
                    self.context.store.location().display().to_string(),
                    e.to_string(),
                ));
            }
        };
        debug!("Snapshot changed: {} rows", rows);

        if rows >= 1 {
            self.context.board.show_waiting(rows);
        }
        if rows >= self.settings.min_rows {
            let context = self.context.clone();
            self.debouncer.schedule(async move {
                if let Err(e) = context.query_status_once().await {
                    warn!("Status query failed: {}", e);
                }
            });
        }
        Ok(Some(rows))
    }

    /// Poll until cancelled; recoverable errors are logged and polling goes on
    pub async fn run(mut self, cancel: CancellationToken) -> FlightdeckResult<()> {
        info!(
            "Watching {} every {:?}",
            self.context.store.location().display(),
            self.settings.poll_period
        );

        loop {
            if let Err(e) = self.poll_once().await {
                warn!("Snapshot poll failed: {}", e);
            }

            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(self.settings.poll_period) => {}
            }
        }

        debug!("Watcher stopped");
        Ok(())
    }
}
