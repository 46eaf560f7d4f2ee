//! Incremental snapshot release driven by virtual time

use super::schedule::{eligible_rows, ReleaseTick, ALIGNMENT_EPSILON};
use crate::clock::VirtualClock;
use crate::config::{DatasetConfig, ReleaseConfig};
use crate::dataset::{Field, Schema, TimeSeriesDataset};
use crate::error::{FlightdeckError, FlightdeckResult};
use crate::service::SnapshotUploader;
use flightdeck_snapshot::{Pair, Snapshot, SnapshotStore};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Fields the scheduler reads, in column order
pub fn release_schema(config: &DatasetConfig) -> Schema {
    Schema::new(
        config.field_spec(Field::Time),
        vec![
            config.field_spec(Field::TrackingError),
            config.field_spec(Field::ErrorDerivative),
            config.field_spec(Field::ErrorSecondDerivative),
        ],
    )
}

/// Runtime settings for one scheduler run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReleaseSettings {
    pub scale: f64,
    pub interval: f64,
    pub poll_period: Duration,
}

impl From<&ReleaseConfig> for ReleaseSettings {
    fn from(config: &ReleaseConfig) -> Self {
        Self {
            scale: config.scale,
            interval: config.interval,
            poll_period: config.poll_period,
        }
    }
}

/// Outcome of a scheduler run
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseReport {
    pub released: usize,
    pub total: usize,
    pub ticks: Vec<ReleaseTick>,
    /// False when the run was cancelled before every row went out
    pub completed: bool,
}

/// Reveals the release-eligible rows of a dataset one tick at a time.
///
/// Every tick appends one row and overwrites the stored snapshot with the
/// whole cumulative prefix, then hands its location to the uploader.
pub struct ReleaseScheduler {
    eligible: TimeSeriesDataset,
    first_timestamp: f64,
    settings: ReleaseSettings,
    store: Arc<dyn SnapshotStore>,
    uploader: Arc<dyn SnapshotUploader>,
}

impl ReleaseScheduler {
    /// `dataset` must have been loaded with [`release_schema`]
    pub fn new(
        dataset: &TimeSeriesDataset,
        settings: ReleaseSettings,
        store: Arc<dyn SnapshotStore>,
        uploader: Arc<dyn SnapshotUploader>,
    ) -> FlightdeckResult<Self> {
        if dataset.column_count() != 3 {
            return Err(FlightdeckError::config(format!(
                "release needs 3 value columns, dataset has {}",
                dataset.column_count()
            )));
        }
        if !(settings.interval > 0.0) {
            return Err(FlightdeckError::config("release interval must be positive"));
        }

        let rows = eligible_rows(dataset.timestamps(), settings.interval);
        info!(
            "Data length: {} of {} rows on {}s boundaries",
            rows.len(),
            dataset.len(),
            settings.interval
        );

        Ok(Self {
            eligible: dataset.select_rows(&rows),
            first_timestamp: dataset.first_timestamp(),
            settings,
            store,
            uploader,
        })
    }

    /// Number of rows that will be released
    pub fn total(&self) -> usize {
        self.eligible.len()
    }

    fn row(&self, index: usize) -> (Pair, Pair) {
        let te = self.eligible.column(0)[index];
        let dte = self.eligible.column(1)[index];
        let ddte = self.eligible.column(2)[index];
        (Pair(te, dte), Pair(dte, ddte))
    }

    /// Run with a clock whose origin is the dataset's first timestamp, now
    pub async fn run(&self, cancel: CancellationToken) -> FlightdeckResult<ReleaseReport> {
        let clock = VirtualClock::start(self.first_timestamp, self.settings.scale);
        self.run_with_clock(clock, cancel).await
    }

    pub async fn run_with_clock(
        &self,
        clock: VirtualClock,
        cancel: CancellationToken,
    ) -> FlightdeckResult<ReleaseReport> {
        let total = self.total();
        let mut snapshot = Snapshot::new();
        let mut ticks = Vec::with_capacity(total);

        while ticks.len() < total {
            if cancel.is_cancelled() {
                break;
            }

            let vt = clock.now();
            let mut released_any = false;

            loop {
                let index = ticks.len();
                if index >= total {
                    break;
                }
                let tick = ReleaseTick::at(index, self.first_timestamp, self.settings.interval);
                if vt + ALIGNMENT_EPSILON < tick.scheduled_time {
                    break;
                }

                let (e, de) = self.row(index);
                snapshot.push(e, de);
                self.store.save(&snapshot).await?;
                info!(
                    "Snapshot updated at virtual time {} ({} rows)",
                    tick.scheduled_time,
                    snapshot.rows()
                );

                if let Err(e) = self.uploader.upload_snapshot(self.store.location()).await {
                    warn!("Upload failed: {}", e);
                }

                ticks.push(tick);
                released_any = true;
            }

            if ticks.len() >= total {
                break;
            }

            if !released_any {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = tokio::time::sleep(self.settings.poll_period) => {}
                }
            }
        }

        let completed = ticks.len() == total;
        if completed {
            info!("Finished all {} updates", total);
        } else {
            debug!("Release cancelled after {} of {} updates", ticks.len(), total);
        }

        Ok(ReleaseReport {
            released: ticks.len(),
            total,
            ticks,
            completed,
        })
    }
}
