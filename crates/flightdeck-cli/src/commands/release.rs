//! `flightdeck release`

use crate::console::CliConsole;
use anyhow::{Context, Result};
use flightdeck_core::release::{release_schema, ReleaseReport, ReleaseScheduler, ReleaseSettings};
use flightdeck_core::{FlightdeckConfig, ServiceClient, SnapshotUploader, TimeSeriesDataset};
use flightdeck_snapshot::LocalSnapshotStore;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Load the dataset and wire the scheduler to the snapshot artifact
pub fn build_scheduler(
    config: &FlightdeckConfig,
    uploader: Arc<dyn SnapshotUploader>,
) -> Result<ReleaseScheduler> {
    let path = &config.dataset.path;
    let dataset = TimeSeriesDataset::load(path, &release_schema(&config.dataset))
        .with_context(|| format!("cannot load dataset {}", path.display()))?;
    let store = Arc::new(LocalSnapshotStore::new(&config.release.snapshot_path));

    let scheduler =
        ReleaseScheduler::new(&dataset, ReleaseSettings::from(&config.release), store, uploader)?;
    Ok(scheduler)
}

pub fn print_report(console: &CliConsole, report: &ReleaseReport) {
    if report.completed {
        console.success(&format!("Finished all {} updates", report.total));
    } else {
        console.warn(&format!(
            "Stopped after {} of {} updates",
            report.released, report.total
        ));
    }
    if let Some(last) = report.ticks.last() {
        console.info(&format!("Last release at virtual time {}", last.scheduled_time));
    }
}

pub async fn run(config: &FlightdeckConfig, verbose: bool, cancel: CancellationToken) -> Result<()> {
    let console = CliConsole::new(verbose);
    let service = ServiceClient::from_config(&config.service)?;
    let scheduler = build_scheduler(config, service.uploader())?;

    console.info(&format!(
        "Releasing {} rows every {}s to {}",
        scheduler.total(),
        config.release.interval,
        config.release.snapshot_path.display()
    ));

    let report = scheduler.run(cancel).await.context("release stopped")?;
    print_report(&console, &report);
    Ok(())
}
