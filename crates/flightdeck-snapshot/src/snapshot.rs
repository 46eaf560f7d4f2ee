//! Snapshot data structures
//!
//! A snapshot is append-only: every release adds one row to both matrices.
//! - `e`: (tracking error, tracking error derivative)
//! - `de`: (tracking error derivative, tracking error second derivative)

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One matrix row pairing two quantities.
///
/// Non-finite values are written as JSON `null` and read back as `NaN`,
/// since JSON has no representation for them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pair(pub f64, pub f64);

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

impl Serialize for Pair {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (finite(self.0), finite(self.1)).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Pair {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (a, b): (Option<f64>, Option<f64>) = Deserialize::deserialize(deserializer)?;
        Ok(Pair(a.unwrap_or(f64::NAN), b.unwrap_or(f64::NAN)))
    }
}

/// Cumulative released prefix of the dataset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Tracking error paired with its derivative
    pub e: Vec<Pair>,

    /// Derivative paired with the second derivative
    pub de: Vec<Pair>,
}

impl Snapshot {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one released row to both matrices
    pub fn push(&mut self, e: Pair, de: Pair) {
        self.e.push(e);
        self.de.push(de);
    }

    /// Number of released rows
    pub fn rows(&self) -> usize {
        self.e.len()
    }

    pub fn is_empty(&self) -> bool {
        self.e.is_empty()
    }

    /// Whether `self` is a strict prefix of `other`
    pub fn is_strict_prefix_of(&self, other: &Snapshot) -> bool {
        self.rows() < other.rows()
            && other.e.starts_with(&self.e)
            && other.de.starts_with(&self.de)
    }

    pub fn summary(&self) -> SnapshotSummary {
        SnapshotSummary { rows: self.rows() }
    }
}

/// What a consumer observes of a snapshot: its size, never partial content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotSummary {
    pub rows: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot_with(rows: usize) -> Snapshot {
        let mut snapshot = Snapshot::new();
        for i in 0..rows {
            let x = i as f64;
            snapshot.push(Pair(x, x * 0.5), Pair(x * 0.5, x * 0.25));
        }
        snapshot
    }

    #[test]
    fn test_push_grows_both_matrices() {
        let snapshot = snapshot_with(3);
        assert_eq!(snapshot.rows(), 3);
        assert_eq!(snapshot.de.len(), 3);
        assert_eq!(snapshot.summary(), SnapshotSummary { rows: 3 });
    }

    #[test]
    fn test_strict_prefix() {
        let short = snapshot_with(2);
        let long = snapshot_with(4);
        assert!(short.is_strict_prefix_of(&long));
        assert!(!long.is_strict_prefix_of(&short));
        assert!(!long.is_strict_prefix_of(&long));
    }

    #[test]
    fn test_json_layout() {
        let snapshot = snapshot_with(2);
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["e"][1], serde_json::json!([1.0, 0.5]));
        assert_eq!(json["de"][1], serde_json::json!([0.5, 0.25]));
    }

    #[test]
    fn test_nan_written_as_null() {
        let mut snapshot = Snapshot::new();
        snapshot.push(Pair(f64::NAN, 1.0), Pair(1.0, 2.0));

        let text = serde_json::to_string(&snapshot).unwrap();
        assert!(text.contains("[null,1.0]"));

        let back: Snapshot = serde_json::from_str(&text).unwrap();
        assert!(back.e[0].0.is_nan());
        assert_eq!(back.e[0].1, 1.0);
    }
}
