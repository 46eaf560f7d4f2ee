//! Snapshot artifact for Flightdeck
//!
//! This crate owns the hand-off artifact between the release scheduler and
//! the snapshot watcher:
//! - Snapshot: the cumulative released prefix as two paired matrices
//! - SnapshotSummary: the aggregate view consumers are allowed to observe
//! - Local file storage with whole-artifact atomic replacement

pub mod snapshot;
pub mod storage;

pub use snapshot::{Pair, Snapshot, SnapshotSummary};
pub use storage::{
    LocalSnapshotStore, ModificationMarker, SnapshotStore, StorageError, StorageResult,
};
