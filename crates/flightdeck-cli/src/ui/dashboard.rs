//! Frame loop shared by every terminal command

use super::hud_view::render_hud;
use super::status_view::StatusPanel;
use super::{quit_requested, TuiSession};
use anyhow::Result;
use flightdeck_core::player::{PlayerState, WindowedPlayer};
use flightdeck_core::watcher::StatusView;
use ratatui::prelude::*;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// HUD players and an optional status panel on one screen
pub struct Dashboard {
    players: Vec<WindowedPlayer>,
    status: Option<(StatusPanel, watch::Receiver<StatusView>)>,
    frame_period: Duration,
}

impl Dashboard {
    pub fn new(frame_period: Duration) -> Self {
        Self {
            players: Vec::new(),
            status: None,
            frame_period,
        }
    }

    pub fn with_player(mut self, player: WindowedPlayer) -> Self {
        self.players.push(player);
        self
    }

    pub fn with_status(mut self, status: watch::Receiver<StatusView>) -> Self {
        self.status = Some((StatusPanel::new(), status));
        self
    }

    /// Whether every player has reached the end of its data
    pub fn players_done(&self) -> bool {
        self.players
            .iter()
            .all(|p| p.state() == PlayerState::Stopped)
    }

    /// Advance all units by one frame
    fn tick(&mut self) {
        for player in &mut self.players {
            player.tick();
        }
        if let Some((panel, rx)) = &mut self.status {
            if rx.has_changed().unwrap_or(false) {
                let view = rx.borrow_and_update().clone();
                debug!("Status view changed: {:?}", view);
                panel.update(view);
            }
        }
    }

    fn draw(&self, f: &mut Frame) {
        let [body, footer] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(f.area());

        let panel = self
            .status
            .as_ref()
            .map(|(panel, _)| panel)
            .filter(|panel| self.players.is_empty() || panel.is_visible());

        let hud_area = match panel {
            Some(panel) if self.players.is_empty() => {
                panel.render(f, body);
                None
            }
            Some(panel) => {
                let [huds, side] =
                    Layout::horizontal([Constraint::Percentage(62), Constraint::Percentage(38)])
                        .areas(body);
                panel.render(f, side);
                Some(huds)
            }
            None => Some(body),
        };

        if let Some(area) = hud_area {
            let rows = Layout::vertical(vec![Constraint::Fill(1); self.players.len().max(1)])
                .split(area);
            for (player, rect) in self.players.iter().zip(rows.iter()) {
                render_hud(f, *rect, player);
            }
        }

        let hint = if !self.players.is_empty() && self.players_done() {
            " END OF DATA  q: quit "
        } else {
            " q: quit "
        };
        f.render_widget(Line::from(hint.dark_gray()), footer);
    }

    /// Run the frame loop until the user quits or `cancel` fires. Stopped
    /// players keep their last frame on screen.
    pub async fn run(mut self, cancel: CancellationToken) -> Result<()> {
        let mut session = TuiSession::start();
        let mut frames = tokio::time::interval(self.frame_period);
        frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = frames.tick() => {}
            }

            self.tick();
            session.terminal().draw(|f| self.draw(f))?;

            if quit_requested()? {
                cancel.cancel();
                break;
            }
        }
        Ok(())
    }
}
