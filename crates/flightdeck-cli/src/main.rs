//! Flightdeck CLI application
//!
//! Replays a recorded flight-tracking dataset against a virtual clock.
//!
//! # Installation
//!
//! ```bash
//! cargo install --path crates/flightdeck-cli
//! ```
//!
//! # Units
//!
//! - `release`: reveals the dataset one interval at a time, overwriting the
//!   snapshot artifact and uploading it to the analysis service
//! - `hud altitude` / `hud tracking`: sliding-window playback in the terminal
//! - `watch`: waits for the snapshot to grow and shows the service's verdict
//! - `launch`: clears stale artifacts and runs all of the above together

mod args;
mod commands;
mod console;
mod logging;
mod router;
mod signal_handler;
mod ui;

use clap::Parser;

pub use args::{Cli, Commands, ConfigAction};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    router::route(cli).await
}
