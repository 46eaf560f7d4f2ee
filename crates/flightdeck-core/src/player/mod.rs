//! Windowed HUD playback
//!
//! One player type drives both HUDs. A [`PlayerProfile`] decides which
//! columns are plotted, how many y-axes there are and how each one
//! autoscales; the player turns virtual time into [`HudFrame`]s.

mod autoscale;
#[allow(clippy::module_inception)]
mod player;
mod profile;

pub use autoscale::{fit_range, window_extent, AxisRange, MIN_WINDOW_SAMPLES};
pub use player::{format_readout, HudFrame, PlayerState, WindowState, WindowedPlayer};
pub use profile::{AxisSpec, PlayerProfile, ProfileKind, SeriesSpec};
