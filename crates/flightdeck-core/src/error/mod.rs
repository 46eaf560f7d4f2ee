//! Error types for Flightdeck
//!
//! Recoverable errors (network, malformed artifacts) are logged by the loop
//! that owns them and never stop it. Startup errors (column resolution,
//! malformed datasets, configuration) abort the component that hit them.

mod constructors;
mod conversions;
mod types;

pub use types::{FlightdeckError, FlightdeckResult};
