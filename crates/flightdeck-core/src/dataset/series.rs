//! Column-major time series storage

use super::columns::resolve_field;
use super::Schema;
use crate::error::{FlightdeckError, FlightdeckResult};
use std::io;
use std::path::Path;
use tracing::{debug, info};

/// Immutable, time-ordered dataset resolved against a [`Schema`]
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesDataset {
    timestamps: Vec<f64>,
    columns: Vec<Vec<f64>>,
    time_header: String,
    headers: Vec<String>,
}

fn parse_value(cell: &str) -> f64 {
    cell.trim().parse().unwrap_or(f64::NAN)
}

impl TimeSeriesDataset {
    /// Load a CSV file, resolving every schema field up front
    pub fn load(path: &Path, schema: &Schema) -> FlightdeckResult<Self> {
        let file = std::fs::File::open(path).map_err(|e| {
            FlightdeckError::io_with_path(
                format!("Failed to open dataset: {}", e),
                path.display().to_string(),
            )
        })?;

        let dataset = Self::from_reader(file, schema)
            .map_err(|e| e.with_dataset_path(path.display().to_string()))?;

        info!(
            "Loaded {} rows from {} (time column '{}')",
            dataset.len(),
            path.display(),
            dataset.time_header
        );
        Ok(dataset)
    }

    /// Read CSV content from any reader
    pub fn from_reader<R: io::Read>(reader: R, schema: &Schema) -> FlightdeckResult<Self> {
        // Short rows are allowed; missing cells read as empty
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

        let time_index = resolve_field(&headers, &schema.time)?;
        let value_indices = schema
            .fields
            .iter()
            .map(|spec| resolve_field(&headers, spec))
            .collect::<FlightdeckResult<Vec<_>>>()?;

        for (spec, index) in schema.fields.iter().zip(&value_indices) {
            debug!("Resolved '{}' to column '{}'", spec.field.name(), headers[*index]);
        }

        let mut timestamps = Vec::new();
        let mut columns = vec![Vec::new(); value_indices.len()];

        for (row, record) in reader.records().enumerate() {
            let record = record?;
            let raw_time = record.get(time_index).unwrap_or("");
            let time: f64 = raw_time.trim().parse().map_err(|_| {
                FlightdeckError::malformed_dataset(format!(
                    "row {}: time value '{}' is not numeric",
                    row + 1,
                    raw_time
                ))
            })?;
            timestamps.push(time);

            for (column, index) in columns.iter_mut().zip(&value_indices) {
                column.push(parse_value(record.get(*index).unwrap_or("")));
            }
        }

        let time_header = headers[time_index].clone();
        let resolved = value_indices.iter().map(|i| headers[*i].clone()).collect();
        Self::assemble(timestamps, columns, time_header, resolved)
    }

    /// Build a dataset from in-memory columns, one per schema value field
    pub fn from_columns(
        schema: &Schema,
        timestamps: Vec<f64>,
        columns: Vec<Vec<f64>>,
    ) -> FlightdeckResult<Self> {
        if columns.len() != schema.fields.len() {
            return Err(FlightdeckError::malformed_dataset(format!(
                "expected {} value columns, got {}",
                schema.fields.len(),
                columns.len()
            )));
        }
        let time_header = schema.time.field.name().to_string();
        let headers = schema.fields.iter().map(|s| s.field.name().to_string()).collect();
        Self::assemble(timestamps, columns, time_header, headers)
    }

    fn assemble(
        timestamps: Vec<f64>,
        columns: Vec<Vec<f64>>,
        time_header: String,
        headers: Vec<String>,
    ) -> FlightdeckResult<Self> {
        if timestamps.is_empty() {
            return Err(FlightdeckError::malformed_dataset("dataset has no rows"));
        }
        if let Some(column) = columns.iter().find(|c| c.len() != timestamps.len()) {
            return Err(FlightdeckError::malformed_dataset(format!(
                "column has {} values for {} timestamps",
                column.len(),
                timestamps.len()
            )));
        }
        if let Some(i) = timestamps.iter().position(|t| !t.is_finite()) {
            return Err(FlightdeckError::malformed_dataset(format!(
                "row {}: timestamp is not finite",
                i + 1
            )));
        }
        if let Some(i) = timestamps.windows(2).position(|w| w[1] < w[0]) {
            return Err(FlightdeckError::malformed_dataset(format!(
                "timestamps decrease at row {} ({} after {})",
                i + 2,
                timestamps[i + 1],
                timestamps[i]
            )));
        }

        Ok(Self {
            timestamps,
            columns,
            time_header,
            headers,
        })
    }

    /// Keep only the given rows, in the given order
    pub fn select_rows(&self, rows: &[usize]) -> Self {
        Self {
            timestamps: rows.iter().map(|&r| self.timestamps[r]).collect(),
            columns: self
                .columns
                .iter()
                .map(|column| rows.iter().map(|&r| column[r]).collect())
                .collect(),
            time_header: self.time_header.clone(),
            headers: self.headers.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn timestamps(&self) -> &[f64] {
        &self.timestamps
    }

    /// Value column at a schema position
    pub fn column(&self, position: usize) -> &[f64] {
        &self.columns[position]
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn first_timestamp(&self) -> f64 {
        self.timestamps[0]
    }

    pub fn last_timestamp(&self) -> f64 {
        self.timestamps[self.timestamps.len() - 1]
    }

    pub fn time_header(&self) -> &str {
        &self.time_header
    }

    /// Source header each value column was resolved to
    pub fn headers(&self) -> &[String] {
        &self.headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Field, FieldSpec};

    fn schema() -> Schema {
        Schema::new(
            FieldSpec::new(Field::Time, vec!["Time (s)".into(), "time".into()]),
            vec![
                FieldSpec::new(Field::Reference, vec!["Reference".into()]),
                FieldSpec::new(Field::Altitude, vec!["Altitude".into()]),
            ],
        )
    }

    #[test]
    fn test_from_reader_resolves_and_parses() {
        let csv = " Time (s) ,Altitude,Reference\n0.0,100,110\n0.5,101,\n1.0,102,112\n";
        let dataset = TimeSeriesDataset::from_reader(csv.as_bytes(), &schema()).unwrap();

        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.time_header(), "Time (s)");
        assert_eq!(dataset.timestamps(), &[0.0, 0.5, 1.0]);
        // Columns follow schema order, not file order
        assert_eq!(dataset.column(1), &[100.0, 101.0, 102.0]);
        assert_eq!(dataset.column(0)[0], 110.0);
        assert!(dataset.column(0)[1].is_nan());
        assert_eq!(dataset.headers(), &["Reference".to_string(), "Altitude".to_string()]);
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let csv = "time,Altitude\n0,1\n";
        let err = TimeSeriesDataset::from_reader(csv.as_bytes(), &schema()).unwrap_err();
        assert!(matches!(err, FlightdeckError::ColumnNotFound { .. }));
    }

    #[test]
    fn test_decreasing_timestamps_rejected() {
        let csv = "time,Reference,Altitude\n0,1,1\n2,1,1\n1,1,1\n";
        let err = TimeSeriesDataset::from_reader(csv.as_bytes(), &schema()).unwrap_err();
        assert!(matches!(err, FlightdeckError::MalformedDataset { .. }));
    }

    #[test]
    fn test_equal_timestamps_allowed() {
        let csv = "time,Reference,Altitude\n0,1,1\n0,2,2\n1,3,3\n";
        let dataset = TimeSeriesDataset::from_reader(csv.as_bytes(), &schema()).unwrap();
        assert_eq!(dataset.len(), 3);
    }

    #[test]
    fn test_empty_dataset_rejected() {
        let csv = "time,Reference,Altitude\n";
        let err = TimeSeriesDataset::from_reader(csv.as_bytes(), &schema()).unwrap_err();
        assert!(matches!(err, FlightdeckError::MalformedDataset { .. }));
    }

    #[test]
    fn test_non_numeric_time_rejected() {
        let csv = "time,Reference,Altitude\nnoon,1,1\n";
        let err = TimeSeriesDataset::from_reader(csv.as_bytes(), &schema()).unwrap_err();
        assert!(err.to_string().contains("noon"));
    }

    #[test]
    fn test_short_row_fills_missing_values_with_nan() {
        let csv = "time,Reference,Altitude\n0,1,2\n1,5\n2,7,8\n";
        let dataset = TimeSeriesDataset::from_reader(csv.as_bytes(), &schema()).unwrap();

        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.column(0), &[1.0, 5.0, 7.0]);
        assert_eq!(dataset.column(1)[0], 2.0);
        assert!(dataset.column(1)[1].is_nan());
        assert_eq!(dataset.column(1)[2], 8.0);
    }

    #[test]
    fn test_short_row_missing_time_rejected() {
        let csv = "Reference,Altitude,time\n1,2,0\n5,6\n";
        let err = TimeSeriesDataset::from_reader(csv.as_bytes(), &schema()).unwrap_err();
        assert!(matches!(err, FlightdeckError::MalformedDataset { .. }));
        assert!(err.to_string().contains("row 2"));
    }

    #[test]
    fn test_select_rows() {
        let dataset = TimeSeriesDataset::from_columns(
            &schema(),
            vec![0.0, 1.0, 2.0, 3.0],
            vec![vec![10.0, 11.0, 12.0, 13.0], vec![20.0, 21.0, 22.0, 23.0]],
        )
        .unwrap();

        let picked = dataset.select_rows(&[0, 2]);
        assert_eq!(picked.timestamps(), &[0.0, 2.0]);
        assert_eq!(picked.column(1), &[20.0, 22.0]);
        assert_eq!(picked.last_timestamp(), 2.0);
    }
}
