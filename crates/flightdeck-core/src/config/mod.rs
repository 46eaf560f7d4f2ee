//! Configuration management for Flightdeck

pub mod loader;
pub mod logging_config;
pub mod model;
pub mod timeouts;

pub use loader::{ConfigLoader, ConfigOverrides, ConfigSource};
pub use logging_config::{LogFormat, LoggingConfig};
pub use model::{
    DatasetConfig, FlightdeckConfig, HudConfig, ReleaseConfig, ServiceConfig, WatcherConfig,
};

/// Load configuration from the usual sources: defaults, file, environment,
/// then command line overrides.
pub fn load_config(
    path: impl AsRef<std::path::Path>,
    overrides: ConfigOverrides,
) -> crate::error::FlightdeckResult<FlightdeckConfig> {
    ConfigLoader::new()
        .with_defaults()
        .with_file(path)
        .with_env()
        .with_overrides(overrides)
        .load()
}
