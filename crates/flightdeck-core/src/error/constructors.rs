//! Constructor methods for FlightdeckError

use super::types::FlightdeckError;

impl FlightdeckError {
    /// Create a column resolution error
    pub fn column_not_found(
        field: impl Into<String>,
        candidates: &[String],
        available: &[String],
    ) -> Self {
        Self::ColumnNotFound {
            field: field.into(),
            candidates: candidates.to_vec(),
            available: available.to_vec(),
        }
    }

    /// Create a malformed dataset error
    pub fn malformed_dataset(message: impl Into<String>) -> Self {
        Self::MalformedDataset {
            message: message.into(),
            path: None,
        }
    }

    /// Attach the dataset path to a malformed dataset error
    pub fn with_dataset_path(self, path: impl Into<String>) -> Self {
        match self {
            Self::MalformedDataset { message, .. } => Self::MalformedDataset {
                message,
                path: Some(path.into()),
            },
            other => other,
        }
    }

    /// Create a new network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
            url: None,
            status_code: None,
        }
    }

    /// Create a network error for a specific endpoint
    pub fn network_at(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
            url: Some(url.into()),
            status_code: None,
        }
    }

    /// Create a malformed artifact error
    pub fn malformed_artifact(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedArtifact {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            context: None,
        }
    }

    /// Create a configuration error with context
    pub fn config_with_context(message: impl Into<String>, context: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            context: Some(context.into()),
        }
    }

    /// Create a new IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
            path: None,
        }
    }

    /// Create an IO error with path
    pub fn io_with_path(message: impl Into<String>, path: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
            path: Some(path.into()),
        }
    }

    /// Create a new storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}
