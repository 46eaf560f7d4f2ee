//! Core error type for Flightdeck

use thiserror::Error;

/// Result type alias for Flightdeck operations
pub type FlightdeckResult<T> = Result<T, FlightdeckError>;

/// Main error type for Flightdeck
///
/// End of data is not represented here: a finished scheduler returns its
/// report and a finished player reports `PlayerState::Stopped`.
#[derive(Error, Debug, Clone)]
pub enum FlightdeckError {
    /// A required logical field matched none of its aliases
    #[error("Column not found for '{field}': tried {candidates:?}, available {available:?}")]
    ColumnNotFound {
        field: String,
        candidates: Vec<String>,
        available: Vec<String>,
    },

    /// Source dataset is unusable (empty, unparsable time, unsorted)
    #[error("Malformed dataset: {message}")]
    MalformedDataset {
        message: String,
        path: Option<String>,
    },

    /// Remote service errors
    #[error("Network error: {message}")]
    Network {
        message: String,
        url: Option<String>,
        status_code: Option<u16>,
    },

    /// A persisted artifact could not be interpreted
    #[error("Malformed artifact {path}: {message}")]
    MalformedArtifact { path: String, message: String },

    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        context: Option<String>,
    },

    /// IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<String>,
    },

    /// Snapshot storage errors
    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl FlightdeckError {
    /// Stable code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ColumnNotFound { .. } => "FLIGHTDECK_COLUMN_NOT_FOUND",
            Self::MalformedDataset { .. } => "FLIGHTDECK_MALFORMED_DATASET",
            Self::Network { .. } => "FLIGHTDECK_NETWORK",
            Self::MalformedArtifact { .. } => "FLIGHTDECK_MALFORMED_ARTIFACT",
            Self::Config { .. } => "FLIGHTDECK_CONFIG",
            Self::Io { .. } => "FLIGHTDECK_IO",
            Self::Storage { .. } => "FLIGHTDECK_STORAGE",
        }
    }

    /// Whether the owning loop should log and continue
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::MalformedArtifact { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_split() {
        assert!(FlightdeckError::network("timed out").is_recoverable());
        assert!(FlightdeckError::malformed_artifact("a.json", "eof").is_recoverable());
        assert!(!FlightdeckError::config("bad interval").is_recoverable());
        assert!(
            !FlightdeckError::column_not_found("time", &["t".to_string()], &[]).is_recoverable()
        );
    }

    #[test]
    fn test_column_not_found_message() {
        let err = FlightdeckError::column_not_found(
            "time",
            &["Time (s)".to_string(), "Timestamp".to_string()],
            &["altitude".to_string()],
        );
        assert_eq!(err.error_code(), "FLIGHTDECK_COLUMN_NOT_FOUND");
        let message = err.to_string();
        assert!(message.contains("'time'"));
        assert!(message.contains("Timestamp"));
        assert!(message.contains("altitude"));
    }
}
