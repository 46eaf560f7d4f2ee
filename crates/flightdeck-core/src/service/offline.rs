//! Service stand-in used when no analysis server is configured

use super::{AnalysisService, AnalysisStatus, SnapshotUploader};
use crate::error::FlightdeckResult;
use async_trait::async_trait;
use std::path::Path;
use tracing::debug;

/// Accepts uploads without sending them and never reaches a verdict
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineService;

#[async_trait]
impl SnapshotUploader for OfflineService {
    async fn upload_snapshot(&self, path: &Path) -> FlightdeckResult<()> {
        debug!("Service disabled, not uploading {}", path.display());
        Ok(())
    }
}

#[async_trait]
impl AnalysisService for OfflineService {
    async fn status(&self) -> FlightdeckResult<AnalysisStatus> {
        Ok(AnalysisStatus::Unknown)
    }

    async fn formula(&self) -> FlightdeckResult<String> {
        Ok(String::new())
    }
}
