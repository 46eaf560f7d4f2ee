//! Release-eligible rows and tick times

use serde::{Deserialize, Serialize};

/// Floating-point tolerance for interval alignment and tick comparison
pub const ALIGNMENT_EPSILON: f64 = 1e-6;

/// Whether `offset` sits on an integer multiple of `interval`
pub fn is_aligned(offset: f64, interval: f64) -> bool {
    if !(interval > 0.0) || !offset.is_finite() {
        return false;
    }
    let k = (offset / interval + ALIGNMENT_EPSILON).floor();
    (offset - k * interval).abs() <= ALIGNMENT_EPSILON
}

/// Indices of rows whose offset from the first timestamp is aligned to the
/// interval, in dataset order
pub fn eligible_rows(timestamps: &[f64], interval: f64) -> Vec<usize> {
    let Some(&first) = timestamps.first() else {
        return Vec::new();
    };
    timestamps
        .iter()
        .enumerate()
        .filter(|(_, t)| is_aligned(**t - first, interval))
        .map(|(i, _)| i)
        .collect()
}

/// One performed release
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReleaseTick {
    pub index: usize,
    pub scheduled_time: f64,
}

impl ReleaseTick {
    /// Tick `index` of a schedule starting at `first` with the given interval
    pub fn at(index: usize, first: f64, interval: f64) -> Self {
        Self {
            index,
            scheduled_time: first + index as f64 * interval,
        }
    }
}
