//! Flightdeck Core Library
//!
//! This crate provides the core functionality for Flightdeck: replaying a
//! recorded flight-tracking dataset against a virtual clock, releasing it
//! incrementally to a remote stability analysis service, and watching for
//! the service's verdict.

pub mod certificate;
pub mod clock;
pub mod config;
pub mod dataset;
pub mod error;
pub mod player;
pub mod release;
pub mod service;
pub mod watcher;

// Re-export commonly used types
pub use certificate::{Certificate, QuadraticCoefficients, Surface};
pub use clock::VirtualClock;
pub use config::{ConfigLoader, ConfigOverrides, FlightdeckConfig};
pub use dataset::{Field, FieldSpec, Schema, TimeSeriesDataset};
pub use error::{FlightdeckError, FlightdeckResult};
pub use player::{HudFrame, PlayerProfile, PlayerState, ProfileKind, WindowedPlayer};
pub use release::{ReleaseReport, ReleaseScheduler, ReleaseSettings, ReleaseTick};
pub use service::{AnalysisService, AnalysisStatus, ServiceClient, SnapshotUploader};
pub use watcher::{SnapshotWatcher, StatusBoard, StatusView, WatcherContext, WatcherSettings};
