//! Column resolution against ordered alias lists

use super::FieldSpec;
use crate::error::{FlightdeckError, FlightdeckResult};

/// Find the header matching the first candidate that matches anything.
///
/// Pass one accepts exact or case-insensitive equality, walking candidates in
/// order. Pass two accepts headers containing a candidate, case-insensitively.
/// Headers are compared trimmed; the returned index points into `headers`.
pub fn resolve_column(headers: &[String], candidates: &[String]) -> Option<usize> {
    let trimmed: Vec<&str> = headers.iter().map(|h| h.trim()).collect();

    for candidate in candidates {
        let position = trimmed
            .iter()
            .position(|h| *h == candidate.as_str() || h.eq_ignore_ascii_case(candidate));
        if position.is_some() {
            return position;
        }
    }

    for candidate in candidates {
        let needle = candidate.to_lowercase();
        let position = trimmed.iter().position(|h| h.to_lowercase().contains(&needle));
        if position.is_some() {
            return position;
        }
    }

    None
}

/// Resolve a logical field or fail with `ColumnNotFound`
pub fn resolve_field(headers: &[String], spec: &FieldSpec) -> FlightdeckResult<usize> {
    resolve_column(headers, &spec.aliases).ok_or_else(|| {
        let available: Vec<String> = headers.iter().map(|h| h.trim().to_string()).collect();
        FlightdeckError::column_not_found(spec.field.name(), &spec.aliases, &available)
    })
}
