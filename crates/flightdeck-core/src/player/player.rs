//! Sliding-window playback against virtual time

use super::autoscale::{fit_range, window_extent, AxisRange, MIN_WINDOW_SAMPLES};
use super::profile::PlayerProfile;
use crate::clock::VirtualClock;
use crate::config::HudConfig;
use crate::dataset::TimeSeriesDataset;
use crate::error::{FlightdeckError, FlightdeckResult};
use std::ops::Range;
use tracing::{debug, info};

/// The visible x-range, recomputed every frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowState {
    pub center: f64,
    pub half_width: f64,
}

impl WindowState {
    pub fn centered(center: f64, width: f64) -> Self {
        Self {
            center,
            half_width: width / 2.0,
        }
    }

    pub fn start(&self) -> f64 {
        self.center - self.half_width
    }

    pub fn end(&self) -> f64 {
        self.center + self.half_width
    }

    pub fn width(&self) -> f64 {
        2.0 * self.half_width
    }
}

/// Playback lifecycle; `Stopped` is final
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    Running,
    Stopped,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct HudFrame {
    pub virtual_time: f64,
    pub window: WindowState,
    /// Number of samples with timestamp before `virtual_time`
    pub played: usize,
    /// Played samples inside the window; the only ones drawn
    pub visible: Range<usize>,
    /// Per-axis y-range, `None` until enough samples have been seen
    pub axis_ranges: Vec<Option<AxisRange>>,
    pub readout: String,
    pub state: PlayerState,
}

/// Format the virtual-time readout
pub fn format_readout(virtual_time: f64) -> String {
    format!("T = {:8.2} SEC", virtual_time)
}

pub struct WindowedPlayer {
    profile: PlayerProfile,
    dataset: TimeSeriesDataset,
    clock: VirtualClock,
    window: f64,
    axis_ranges: Vec<Option<AxisRange>>,
    state: PlayerState,
    last_frame: Option<HudFrame>,
}

impl WindowedPlayer {
    /// `dataset` must have been loaded with the profile's schema
    pub fn new(
        profile: PlayerProfile,
        dataset: TimeSeriesDataset,
        clock: VirtualClock,
        window: f64,
    ) -> FlightdeckResult<Self> {
        if dataset.column_count() != profile.series.len() {
            return Err(FlightdeckError::config(format!(
                "{} plots {} series, dataset has {} columns",
                profile.title,
                profile.series.len(),
                dataset.column_count()
            )));
        }
        if !(window > 0.0) {
            return Err(FlightdeckError::config("HUD window must be positive"));
        }

        let axis_ranges = vec![None; profile.axes.len()];
        Ok(Self {
            profile,
            dataset,
            clock,
            window,
            axis_ranges,
            state: PlayerState::Running,
            last_frame: None,
        })
    }

    /// Start a player whose clock origin is the dataset's first timestamp, now
    pub fn start(
        profile: PlayerProfile,
        dataset: TimeSeriesDataset,
        config: &HudConfig,
    ) -> FlightdeckResult<Self> {
        let clock = VirtualClock::start(dataset.first_timestamp(), config.scale);
        info!(
            "{} playing {} rows from t={} (window {}s, scale {})",
            profile.title,
            dataset.len(),
            dataset.first_timestamp(),
            config.window,
            config.scale
        );
        Self::new(profile, dataset, clock, config.window)
    }

    /// Produce the next frame from the clock; `None` once stopped
    pub fn tick(&mut self) -> Option<&HudFrame> {
        if self.state == PlayerState::Stopped {
            return None;
        }
        let vt = self.clock.now();
        Some(self.advance_to(vt))
    }

    /// Compute the frame for a given virtual time
    pub fn advance_to(&mut self, vt: f64) -> &HudFrame {
        let timestamps = self.dataset.timestamps();
        let window = WindowState::centered(vt, self.window);

        let played = timestamps.partition_point(|&t| t < vt);
        let lo = timestamps.partition_point(|&t| t < window.start());
        let hi = timestamps.partition_point(|&t| t <= window.end());

        if hi - lo > MIN_WINDOW_SAMPLES {
            for (slot, axis) in self.axis_ranges.iter_mut().zip(&self.profile.axes) {
                let columns = axis
                    .series
                    .iter()
                    .map(|&s| &self.dataset.column(s)[lo..hi]);
                if let Some((min, max)) = window_extent(columns) {
                    *slot = Some(fit_range(min, max, axis.min_range, axis.pad_fraction));
                }
            }
        }

        if vt >= self.dataset.last_timestamp() && self.state == PlayerState::Running {
            self.state = PlayerState::Stopped;
            info!("{} reached end of data at t={:.2}", self.profile.title, vt);
        }

        let frame = HudFrame {
            virtual_time: vt,
            window,
            played,
            visible: lo..played.max(lo),
            axis_ranges: self.axis_ranges.clone(),
            readout: format_readout(vt),
            state: self.state,
        };
        debug!("{} frame at t={:.3}: {} played", self.profile.title, vt, played);
        self.last_frame.insert(frame)
    }

    /// Drawable `(t, value)` points of one series for a frame
    pub fn series_points(&self, series: usize, frame: &HudFrame) -> Vec<(f64, f64)> {
        let timestamps = &self.dataset.timestamps()[frame.visible.clone()];
        let values = &self.dataset.column(series)[frame.visible.clone()];
        timestamps
            .iter()
            .zip(values)
            .filter(|(_, v)| v.is_finite())
            .map(|(&t, &v)| (t, v))
            .collect()
    }

    pub fn last_frame(&self) -> Option<&HudFrame> {
        self.last_frame.as_ref()
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn profile(&self) -> &PlayerProfile {
        &self.profile
    }
}
