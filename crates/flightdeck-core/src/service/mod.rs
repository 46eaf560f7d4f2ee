//! Remote analysis service
//!
//! The scheduler only uploads snapshots; the watcher only asks for the
//! verdict and the certificate formula. Both talk to the service through the
//! traits below so the HTTP wiring stays replaceable.

mod http;
mod offline;

pub use http::HttpAnalysisClient;
pub use offline::OfflineService;

use crate::config::ServiceConfig;
use crate::error::FlightdeckResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// Verdict reported by the analysis service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisStatus {
    Unknown,
    Pending,
    Fail,
    Success,
}

impl AnalysisStatus {
    /// Parse the service's status string; anything unrecognised is `Unknown`
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pending" => Self::Pending,
            "fail" => Self::Fail,
            "success" => Self::Success,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Pending => "pending",
            Self::Fail => "fail",
            Self::Success => "success",
        }
    }
}

/// Receives every released snapshot
#[async_trait]
pub trait SnapshotUploader: Send + Sync {
    /// Upload the snapshot artifact at `path` as a file payload
    async fn upload_snapshot(&self, path: &Path) -> FlightdeckResult<()>;
}

/// Answers status queries about the uploaded data
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnalysisService: Send + Sync {
    /// Current verdict
    async fn status(&self) -> FlightdeckResult<AnalysisStatus>;

    /// Certificate formula; only meaningful after `Success`
    async fn formula(&self) -> FlightdeckResult<String>;
}

/// The configured service, exposed through both seams
#[derive(Clone)]
pub enum ServiceClient {
    Http(Arc<HttpAnalysisClient>),
    Offline(Arc<OfflineService>),
}

impl ServiceClient {
    /// Build the client described by the configuration
    pub fn from_config(config: &ServiceConfig) -> FlightdeckResult<Self> {
        if !config.enabled {
            return Ok(Self::Offline(Arc::new(OfflineService)));
        }
        Ok(Self::Http(Arc::new(HttpAnalysisClient::new(config)?)))
    }

    pub fn uploader(&self) -> Arc<dyn SnapshotUploader> {
        match self {
            Self::Http(client) => client.clone(),
            Self::Offline(service) => service.clone(),
        }
    }

    pub fn analysis(&self) -> Arc<dyn AnalysisService> {
        match self {
            Self::Http(client) => client.clone(),
            Self::Offline(service) => service.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse() {
        assert_eq!(AnalysisStatus::parse("success"), AnalysisStatus::Success);
        assert_eq!(AnalysisStatus::parse(" FAIL "), AnalysisStatus::Fail);
        assert_eq!(AnalysisStatus::parse("pending"), AnalysisStatus::Pending);
        assert_eq!(AnalysisStatus::parse("queued"), AnalysisStatus::Unknown);
        assert_eq!(AnalysisStatus::parse(""), AnalysisStatus::Unknown);
    }

    #[test]
    fn test_disabled_config_is_offline() {
        let config = ServiceConfig {
            enabled: false,
            ..Default::default()
        };
        let client = ServiceClient::from_config(&config).unwrap();
        assert!(matches!(client, ServiceClient::Offline(_)));
    }
}
