//! `flightdeck hud <altitude|tracking>`

use crate::ui::Dashboard;
use anyhow::{Context, Result};
use flightdeck_core::player::{PlayerProfile, ProfileKind, WindowedPlayer};
use flightdeck_core::{FlightdeckConfig, TimeSeriesDataset};
use tokio_util::sync::CancellationToken;

/// Load the profile's columns and start its player clock
pub fn build_player(config: &FlightdeckConfig, kind: ProfileKind) -> Result<WindowedPlayer> {
    let profile = PlayerProfile::for_kind(kind);
    let path = &config.dataset.path;
    let dataset = TimeSeriesDataset::load(path, &profile.schema(&config.dataset))
        .with_context(|| format!("cannot load dataset {}", path.display()))?;
    Ok(WindowedPlayer::start(profile, dataset, &config.hud)?)
}

pub async fn run(config: &FlightdeckConfig, kind: ProfileKind, cancel: CancellationToken) -> Result<()> {
    let player = build_player(config, kind)?;
    Dashboard::new(config.hud.frame_period())
        .with_player(player)
        .run(cancel)
        .await
}
