//! Centralized timing defaults
//!
//! Every value here can be overridden via configuration.

use std::time::Duration;

/// Default timeout values for remote service calls
pub mod network {
    use super::*;

    /// Snapshot upload timeout (3 seconds)
    pub const UPLOAD_SECS: u64 = 3;

    /// Status and formula query timeout (2 seconds)
    pub const QUERY_SECS: u64 = 2;

    pub fn upload_timeout() -> Duration {
        Duration::from_secs(UPLOAD_SECS)
    }

    pub fn query_timeout() -> Duration {
        Duration::from_secs(QUERY_SECS)
    }
}

/// Default cadences for the polling loops
pub mod polling {
    use super::*;

    /// Scheduler re-check period when nothing was released (100 ms)
    pub const RELEASE_MILLIS: u64 = 100;

    /// Watcher snapshot poll period (100 ms)
    pub const WATCHER_MILLIS: u64 = 100;

    /// Quiet period before the watcher queries the service (1 second)
    pub const DEBOUNCE_MILLIS: u64 = 1000;

    pub fn release_period() -> Duration {
        Duration::from_millis(RELEASE_MILLIS)
    }

    pub fn watcher_period() -> Duration {
        Duration::from_millis(WATCHER_MILLIS)
    }

    pub fn debounce_delay() -> Duration {
        Duration::from_millis(DEBOUNCE_MILLIS)
    }
}
