//! Virtual timeline clock
//!
//! Every unit (scheduler, each player, the watcher) builds its own clock at
//! its own start time. Origins are not shared between units, so their
//! playback positions can drift apart.

use tokio::time::Instant;

/// Maps wall-clock elapsed time onto a virtual timeline
#[derive(Debug, Clone, Copy)]
pub struct VirtualClock {
    origin_virtual: f64,
    origin_wall: Instant,
    scale: f64,
}

impl VirtualClock {
    /// Start a clock whose wall origin is now
    pub fn start(origin_virtual: f64, scale: f64) -> Self {
        Self::with_wall_origin(origin_virtual, Instant::now(), scale)
    }

    pub fn with_wall_origin(origin_virtual: f64, origin_wall: Instant, scale: f64) -> Self {
        Self {
            origin_virtual,
            origin_wall,
            scale,
        }
    }

    /// Current virtual time
    pub fn now(&self) -> f64 {
        self.at(Instant::now())
    }

    /// Virtual time at a given wall instant. Instants before the origin map
    /// to the origin.
    pub fn at(&self, wall: Instant) -> f64 {
        let elapsed = wall.saturating_duration_since(self.origin_wall).as_secs_f64();
        self.origin_virtual + self.scale * elapsed
    }
}
