//! From trait implementations for FlightdeckError conversions

use super::types::FlightdeckError;
use flightdeck_snapshot::StorageError;

impl From<std::io::Error> for FlightdeckError {
    fn from(error: std::io::Error) -> Self {
        Self::io(error.to_string())
    }
}

impl From<serde_json::Error> for FlightdeckError {
    fn from(error: serde_json::Error) -> Self {
        Self::malformed_artifact("<json>", error.to_string())
    }
}

impl From<reqwest::Error> for FlightdeckError {
    fn from(error: reqwest::Error) -> Self {
        let status_code = error.status().map(|s| s.as_u16());
        let url = error.url().map(|u| u.to_string());
        Self::Network {
            message: error.to_string(),
            url,
            status_code,
        }
    }
}

impl From<csv::Error> for FlightdeckError {
    fn from(error: csv::Error) -> Self {
        if error.is_io_error() {
            return Self::io(error.to_string());
        }
        Self::malformed_dataset(error.to_string())
    }
}

impl From<StorageError> for FlightdeckError {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::Io(e) => Self::io(e.to_string()),
            other => Self::storage(other.to_string()),
        }
    }
}
