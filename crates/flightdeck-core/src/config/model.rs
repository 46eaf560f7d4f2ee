//! Configuration data models

use crate::config::logging_config::LoggingConfig;
use crate::config::timeouts::{network, polling};
use crate::dataset::{Field, FieldSpec};
use crate::error::{FlightdeckError, FlightdeckResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightdeckConfig {
    pub dataset: DatasetConfig,
    pub release: ReleaseConfig,
    pub hud: HudConfig,
    pub watcher: WatcherConfig,
    pub service: ServiceConfig,
    pub logging: LoggingConfig,
}

/// Source dataset location and per-field column aliases
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    pub path: PathBuf,
    pub time_aliases: Vec<String>,
    pub tracking_error_aliases: Vec<String>,
    pub error_derivative_aliases: Vec<String>,
    pub error_second_derivative_aliases: Vec<String>,
    pub reference_aliases: Vec<String>,
    pub altitude_aliases: Vec<String>,
}

fn aliases(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("dense_tracking_data.csv"),
            time_aliases: aliases(&["Time (s)", "Timestamp", "time", "t"]),
            tracking_error_aliases: aliases(&["Tracking Error"]),
            error_derivative_aliases: aliases(&["Tracking Error Derivative"]),
            error_second_derivative_aliases: aliases(&["Tracking Error Second Derivative"]),
            reference_aliases: aliases(&["Reference"]),
            altitude_aliases: aliases(&["Altitude"]),
        }
    }
}

impl DatasetConfig {
    /// Ordered alias list for a logical field
    pub fn aliases(&self, field: Field) -> &[String] {
        match field {
            Field::Time => &self.time_aliases,
            Field::TrackingError => &self.tracking_error_aliases,
            Field::ErrorDerivative => &self.error_derivative_aliases,
            Field::ErrorSecondDerivative => &self.error_second_derivative_aliases,
            Field::Reference => &self.reference_aliases,
            Field::Altitude => &self.altitude_aliases,
        }
    }

    pub fn field_spec(&self, field: Field) -> FieldSpec {
        FieldSpec::new(field, self.aliases(field).to_vec())
    }
}

/// Incremental release settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseConfig {
    /// Virtual seconds per wall-clock second
    pub scale: f64,
    /// Virtual seconds between release ticks
    pub interval: f64,
    /// Sleep between checks when nothing was released
    #[serde(with = "humantime_serde")]
    pub poll_period: Duration,
    /// Snapshot artifact path
    pub snapshot_path: PathBuf,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            scale: 1.0,
            interval: 30.0,
            poll_period: polling::release_period(),
            snapshot_path: PathBuf::from("input_data.json"),
        }
    }
}

/// Windowed HUD playback settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HudConfig {
    /// Visible window width in virtual seconds
    pub window: f64,
    /// Frames per second
    pub fps: u32,
    /// Virtual seconds per wall-clock second
    pub scale: f64,
}

impl Default for HudConfig {
    fn default() -> Self {
        Self {
            window: 20.0,
            fps: 30,
            scale: 1.0,
        }
    }
}

impl HudConfig {
    pub fn frame_period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.fps.max(1)))
    }
}

/// Snapshot watcher settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatcherConfig {
    #[serde(with = "humantime_serde")]
    pub poll_period: Duration,
    /// Quiet period after the last snapshot change before querying
    #[serde(with = "humantime_serde")]
    pub debounce_delay: Duration,
    /// Minimum released rows before a query is scheduled
    pub min_rows: usize,
    /// Local copy of the last retrieved formula
    pub formula_path: PathBuf,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            poll_period: polling::watcher_period(),
            debounce_delay: polling::debounce_delay(),
            min_rows: 1,
            formula_path: PathBuf::from("formula_from_srv.txt"),
        }
    }
}

/// Remote analysis service settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// When false, uploads are skipped and the status is always unknown
    pub enabled: bool,
    pub base_url: String,
    #[serde(with = "humantime_serde")]
    pub upload_timeout: Duration,
    #[serde(with = "humantime_serde")]
    pub query_timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: "http://127.0.0.1:8000".to_string(),
            upload_timeout: network::upload_timeout(),
            query_timeout: network::query_timeout(),
        }
    }
}

fn require(condition: bool, message: impl Into<String>, context: &str) -> FlightdeckResult<()> {
    if condition {
        Ok(())
    } else {
        Err(FlightdeckError::config_with_context(message, context))
    }
}

impl FlightdeckConfig {
    /// Validate the configuration
    pub fn validate(&self) -> FlightdeckResult<()> {
        for field in Field::ALL {
            require(
                !self.dataset.aliases(field).is_empty(),
                format!("no column aliases configured for '{}'", field.name()),
                "dataset",
            )?;
        }

        let release = &self.release;
        require(
            release.interval.is_finite() && release.interval > 0.0,
            format!("interval must be positive, got {}", release.interval),
            "release",
        )?;
        require(
            release.scale.is_finite() && release.scale >= 0.0,
            format!("scale must be non-negative, got {}", release.scale),
            "release",
        )?;
        require(!release.poll_period.is_zero(), "poll_period must be non-zero", "release")?;

        let hud = &self.hud;
        require(
            hud.window.is_finite() && hud.window > 0.0,
            format!("window must be positive, got {}", hud.window),
            "hud",
        )?;
        require(hud.fps > 0, "fps must be positive", "hud")?;
        require(
            hud.scale.is_finite() && hud.scale >= 0.0,
            format!("scale must be non-negative, got {}", hud.scale),
            "hud",
        )?;

        let watcher = &self.watcher;
        require(!watcher.poll_period.is_zero(), "poll_period must be non-zero", "watcher")?;
        require(
            !watcher.debounce_delay.is_zero(),
            "debounce_delay must be non-zero",
            "watcher",
        )?;
        require(watcher.min_rows >= 1, "min_rows must be at least 1", "watcher")?;

        if self.service.enabled {
            let url = &self.service.base_url;
            require(
                url.starts_with("http://") || url.starts_with("https://"),
                format!("base_url must be an http(s) URL, got '{}'", url),
                "service",
            )?;
        }

        Ok(())
    }
}
