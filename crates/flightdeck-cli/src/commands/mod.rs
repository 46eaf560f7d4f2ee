//! CLI command handlers

pub mod config;
pub mod hud;
pub mod launch;
pub mod release;
pub mod watch;
