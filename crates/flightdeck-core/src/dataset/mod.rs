//! Recorded flight-tracking dataset
//!
//! The dataset is read once from CSV. Every logical field is resolved against
//! its ordered alias list at load time, after which columns are addressed by
//! their position in the [`Schema`] and never matched by name again.

mod columns;
mod series;

pub use columns::{resolve_column, resolve_field};
pub use series::TimeSeriesDataset;

use serde::{Deserialize, Serialize};

/// Logical fields the system knows how to consume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Time,
    TrackingError,
    ErrorDerivative,
    ErrorSecondDerivative,
    Reference,
    Altitude,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Time,
        Field::TrackingError,
        Field::ErrorDerivative,
        Field::ErrorSecondDerivative,
        Field::Reference,
        Field::Altitude,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Field::Time => "time",
            Field::TrackingError => "tracking_error",
            Field::ErrorDerivative => "tracking_error_derivative",
            Field::ErrorSecondDerivative => "tracking_error_second_derivative",
            Field::Reference => "reference",
            Field::Altitude => "altitude",
        }
    }
}

/// A logical field with its ordered candidate header names
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub field: Field,
    pub aliases: Vec<String>,
}

impl FieldSpec {
    pub fn new(field: Field, aliases: Vec<String>) -> Self {
        Self { field, aliases }
    }
}

/// The fields one consumer needs: a time field plus value fields in a fixed
/// order. Value column `i` of a loaded dataset is `fields[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub time: FieldSpec,
    pub fields: Vec<FieldSpec>,
}

impl Schema {
    pub fn new(time: FieldSpec, fields: Vec<FieldSpec>) -> Self {
        Self { time, fields }
    }

    /// Position of a value field, if the schema carries it
    pub fn position(&self, field: Field) -> Option<usize> {
        self.fields.iter().position(|spec| spec.field == field)
    }
}
