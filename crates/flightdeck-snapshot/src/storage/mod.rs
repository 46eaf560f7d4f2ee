//! Snapshot storage abstraction and implementations
//!
//! Provides trait-based storage for the snapshot hand-off artifact with a
//! local filesystem implementation.

mod local;

pub use local::LocalSnapshotStore;

use crate::{Snapshot, SnapshotSummary};
use async_trait::async_trait;
use std::path::Path;
use std::time::SystemTime;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Snapshot not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid snapshot data: {0}")]
    InvalidData(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Change marker observed by pollers.
///
/// Two markers compare equal only if neither the modification time nor the
/// size of the artifact changed between observations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModificationMarker {
    pub modified: SystemTime,
    pub len: u64,
}

/// Snapshot storage trait for different backends
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Replace the stored snapshot as one whole artifact
    async fn save(&self, snapshot: &Snapshot) -> StorageResult<()>;

    /// Load the stored snapshot
    async fn load(&self) -> StorageResult<Snapshot>;

    /// Current change marker, `None` when nothing is stored
    async fn marker(&self) -> StorageResult<Option<ModificationMarker>>;

    /// Remove the stored snapshot; returns whether one existed
    async fn clear(&self) -> StorageResult<bool>;

    /// Location of the artifact, used as the upload payload
    fn location(&self) -> &Path;

    /// Aggregate view of the stored snapshot
    async fn summary(&self) -> StorageResult<SnapshotSummary> {
        Ok(self.load().await?.summary())
    }
}
