//! HTTP analysis service client

use super::{AnalysisService, AnalysisStatus, SnapshotUploader};
use crate::config::ServiceConfig;
use crate::error::{FlightdeckError, FlightdeckResult};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

const UPLOAD_PATH: &str = "/upload_npz";
const STATUS_PATH: &str = "/result/status";
const FORMULA_PATH: &str = "/result/formula";

#[derive(Debug, Deserialize)]
struct StatusResponse {
    #[serde(default)]
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FormulaResponse {
    #[serde(default)]
    formula: String,
}

/// Client for the analysis server's upload and result endpoints
#[derive(Debug, Clone)]
pub struct HttpAnalysisClient {
    client: reqwest::Client,
    base_url: String,
    upload_timeout: Duration,
    query_timeout: Duration,
}

/// Create HTTP client with configuration
fn create_client() -> FlightdeckResult<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(concat!("flightdeck/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| FlightdeckError::config(format!("Failed to create HTTP client: {}", e)))
}

impl HttpAnalysisClient {
    pub fn new(config: &ServiceConfig) -> FlightdeckResult<Self> {
        Ok(Self {
            client: create_client()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            upload_timeout: config.upload_timeout,
            query_timeout: config.query_timeout,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(&self, path: &str) -> FlightdeckResult<T> {
        let url = self.endpoint(path);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .timeout(self.query_timeout)
            .send()
            .await?
            .error_for_status()?;

        response.json::<T>().await.map_err(|e| {
            FlightdeckError::network_at(format!("Unexpected response body: {}", e), url)
        })
    }
}

#[async_trait]
impl SnapshotUploader for HttpAnalysisClient {
    async fn upload_snapshot(&self, path: &Path) -> FlightdeckResult<()> {
        let url = self.endpoint(UPLOAD_PATH);
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            FlightdeckError::io_with_path(
                format!("Failed to read snapshot for upload: {}", e),
                path.display().to_string(),
            )
        })?;

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("snapshot.json")
            .to_string();
        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("application/json")?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .timeout(self.upload_timeout)
            .send()
            .await?
            .error_for_status()?;

        let body: serde_json::Value = response.json().await.unwrap_or(serde_json::Value::Null);
        info!("Uploaded snapshot: {}", body);
        Ok(())
    }
}

#[async_trait]
impl AnalysisService for HttpAnalysisClient {
    async fn status(&self) -> FlightdeckResult<AnalysisStatus> {
        let response: StatusResponse = self.get_json(STATUS_PATH).await?;
        Ok(response
            .status
            .as_deref()
            .map(AnalysisStatus::parse)
            .unwrap_or(AnalysisStatus::Unknown))
    }

    async fn formula(&self) -> FlightdeckResult<String> {
        let response: FormulaResponse = self.get_json(FORMULA_PATH).await?;
        Ok(response.formula)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let config = ServiceConfig {
            base_url: "http://127.0.0.1:8000/".to_string(),
            ..Default::default()
        };
        let client = HttpAnalysisClient::new(&config).unwrap();
        assert_eq!(client.endpoint(STATUS_PATH), "http://127.0.0.1:8000/result/status");
        assert_eq!(client.upload_timeout, Duration::from_secs(3));
        assert_eq!(client.query_timeout, Duration::from_secs(2));
    }

    #[test]
    fn test_status_body_shapes() {
        let parsed: StatusResponse = serde_json::from_str(r#"{"status": "success"}"#).unwrap();
        assert_eq!(parsed.status.as_deref(), Some("success"));

        let parsed: StatusResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.status.is_none());

        let parsed: FormulaResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.formula.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        // Bind then release a port so nothing is listening on it
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let config = ServiceConfig {
            base_url: format!("http://127.0.0.1:{port}"),
            query_timeout: Duration::from_millis(500),
            ..Default::default()
        };
        let client = HttpAnalysisClient::new(&config).unwrap();

        let err = client.status().await.unwrap_err();
        assert!(err.is_recoverable());
        assert_eq!(err.error_code(), "FLIGHTDECK_NETWORK");
    }
}
