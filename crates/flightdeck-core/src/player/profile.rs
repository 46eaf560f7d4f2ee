//! Plot profiles for the two HUD instances

use crate::config::DatasetConfig;
use crate::dataset::{Field, Schema};
use serde::{Deserialize, Serialize};

/// One plotted series
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSpec {
    pub field: Field,
    pub label: &'static str,
}

/// One independently autoscaled y-axis
#[derive(Debug, Clone, PartialEq)]
pub struct AxisSpec {
    pub label: &'static str,
    /// Indices into [`PlayerProfile::series`]
    pub series: Vec<usize>,
    pub min_range: f64,
    pub pad_fraction: f64,
}

/// Which HUD to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileKind {
    Altitude,
    Tracking,
}

/// Everything that distinguishes one HUD from the other
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerProfile {
    pub kind: ProfileKind,
    pub title: &'static str,
    pub series: Vec<SeriesSpec>,
    pub axes: Vec<AxisSpec>,
}

impl PlayerProfile {
    pub fn for_kind(kind: ProfileKind) -> Self {
        match kind {
            ProfileKind::Altitude => Self::altitude(),
            ProfileKind::Tracking => Self::tracking(),
        }
    }

    /// Reference and altitude on one shared height axis
    pub fn altitude() -> Self {
        Self {
            kind: ProfileKind::Altitude,
            title: "ALTITUDE HUD",
            series: vec![
                SeriesSpec {
                    field: Field::Reference,
                    label: "REFERENCE",
                },
                SeriesSpec {
                    field: Field::Altitude,
                    label: "ALTITUDE",
                },
            ],
            axes: vec![AxisSpec {
                label: "HEIGHT (ft)",
                series: vec![0, 1],
                min_range: 50.0,
                pad_fraction: 0.20,
            }],
        }
    }

    /// Tracking error and its derivative, each on its own axis
    pub fn tracking() -> Self {
        Self {
            kind: ProfileKind::Tracking,
            title: "TRACKING ERROR HUD",
            series: vec![
                SeriesSpec {
                    field: Field::TrackingError,
                    label: "TRACKING ERROR",
                },
                SeriesSpec {
                    field: Field::ErrorDerivative,
                    label: "DERIVATIVE",
                },
            ],
            axes: vec![
                AxisSpec {
                    label: "TRACKING ERROR (ft)",
                    series: vec![0],
                    min_range: 10.0,
                    pad_fraction: 0.15,
                },
                AxisSpec {
                    label: "DERIVATIVE (ft/s)",
                    series: vec![1],
                    min_range: 10.0,
                    pad_fraction: 0.15,
                },
            ],
        }
    }

    /// Dataset schema whose value column `i` is series `i`
    pub fn schema(&self, config: &DatasetConfig) -> Schema {
        Schema::new(
            config.field_spec(Field::Time),
            self.series.iter().map(|s| config.field_spec(s.field)).collect(),
        )
    }
}
