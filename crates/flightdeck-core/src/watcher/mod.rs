//! Snapshot watcher
//!
//! Detects snapshot growth by polling the artifact's modification marker and
//! issues one debounced status query per burst of updates. The verdict is
//! published on a [`StatusBoard`] that the UI reads.

mod debounce;
mod status;
#[allow(clippy::module_inception)]
mod watcher;

pub use debounce::Debouncer;
pub use status::{StatusBoard, StatusView};
pub use watcher::{SnapshotWatcher, WatcherContext, WatcherSettings};
