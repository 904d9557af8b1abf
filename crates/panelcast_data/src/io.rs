//! Panel ingestion from CSV files.

use std::path::Path;

use crate::error::{DataError, Result};
use crate::frame::{Column, PanelFrame};

/// Read a panel table from a CSV file with a header row.
///
/// Float and integer columns map to their [`Column`] counterparts; anything
/// else is read as strings so id and timestamp columns survive untouched.
pub fn read_panel_csv<P: AsRef<Path>>(path: P) -> Result<PanelFrame> {
    use polars::prelude::*;

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.as_ref().to_path_buf()))
        .map_err(|e| DataError::FormatError(format!("Failed to create CSV reader: {e}")))?
        .finish()
        .map_err(|e| DataError::FormatError(format!("Failed to read CSV: {e}")))?;

    let mut columns = Vec::with_capacity(df.width());
    for col in df.get_columns() {
        let name = col.name().to_string();
        let series = col.as_materialized_series();
        let column = match series.dtype() {
            DataType::Float32 | DataType::Float64 => {
                let cast = series
                    .cast(&DataType::Float32)
                    .map_err(|e| DataError::FormatError(format!("Failed to cast column: {e}")))?;
                let values = cast
                    .f32()
                    .map_err(|e| DataError::FormatError(format!("Failed to get f32 values: {e}")))?;
                Column::Float(values.into_iter().map(|v| v.unwrap_or(f32::NAN)).collect())
            }
            dt if dt.is_integer() => {
                let cast = series
                    .cast(&DataType::Int64)
                    .map_err(|e| DataError::FormatError(format!("Failed to cast column: {e}")))?;
                let values = cast
                    .i64()
                    .map_err(|e| DataError::FormatError(format!("Failed to get i64 values: {e}")))?;
                Column::Int(values.into_iter().map(|v| v.unwrap_or(0)).collect())
            }
            _ => {
                let cast = series
                    .cast(&DataType::String)
                    .map_err(|e| DataError::FormatError(format!("Failed to cast column: {e}")))?;
                let values = cast
                    .str()
                    .map_err(|e| DataError::FormatError(format!("Failed to get strings: {e}")))?;
                Column::Str(
                    values
                        .into_iter()
                        .map(|v| v.unwrap_or_default().to_string())
                        .collect(),
                )
            }
        };
        columns.push((name, column));
    }
    PanelFrame::new(columns)
}
