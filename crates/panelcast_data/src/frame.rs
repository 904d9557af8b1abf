//! Ordered column-store panel tables.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::{DataError, Result};

/// A single named column of panel data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Column {
    /// 32-bit float values.
    Float(Vec<f32>),
    /// 64-bit integer values.
    Int(Vec<i64>),
    /// String values.
    Str(Vec<String>),
}

impl Column {
    /// Number of rows in the column.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Column::Float(v) => v.len(),
            Column::Int(v) => v.len(),
            Column::Str(v) => v.len(),
        }
    }

    /// Whether the column has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The row value rendered as a grouping key.
    #[must_use]
    pub fn key_at(&self, row: usize) -> String {
        match self {
            Column::Float(v) => v[row].to_string(),
            Column::Int(v) => v[row].to_string(),
            Column::Str(v) => v[row].clone(),
        }
    }

    fn take(&self, rows: &[usize]) -> Column {
        match self {
            Column::Float(v) => Column::Float(rows.iter().map(|&r| v[r]).collect()),
            Column::Int(v) => Column::Int(rows.iter().map(|&r| v[r]).collect()),
            Column::Str(v) => Column::Str(rows.iter().map(|&r| v[r].clone()).collect()),
        }
    }

    fn tail(&self, n: usize) -> Column {
        let start = self.len().saturating_sub(n);
        match self {
            Column::Float(v) => Column::Float(v[start..].to_vec()),
            Column::Int(v) => Column::Int(v[start..].to_vec()),
            Column::Str(v) => Column::Str(v[start..].to_vec()),
        }
    }
}

/// An ordered collection of equally-long named columns.
///
/// Deliberately small: panelcast needs grouping, slicing, and column
/// append/replace, not a general dataframe library. Column order is
/// preserved everywhere, so derived frames stay comparable to their source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PanelFrame {
    columns: Vec<(String, Column)>,
}

impl PanelFrame {
    /// Build a frame, validating that all columns share one length and that
    /// names are unique.
    pub fn new(columns: Vec<(String, Column)>) -> Result<Self> {
        if let Some((_, first)) = columns.first() {
            let height = first.len();
            for (name, column) in &columns {
                if column.len() != height {
                    return Err(DataError::LengthMismatch {
                        column: name.clone(),
                        expected: height,
                        got: column.len(),
                    });
                }
            }
        }
        for (i, (name, _)) in columns.iter().enumerate() {
            if columns[..i].iter().any(|(other, _)| other == name) {
                return Err(DataError::SchemaMismatch(format!(
                    "duplicate column name: {name}"
                )));
            }
        }
        Ok(Self { columns })
    }

    /// Number of rows.
    #[must_use]
    pub fn height(&self) -> usize {
        self.columns.first().map_or(0, |(_, c)| c.len())
    }

    /// Number of columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Column names in frame order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    /// Look up a column by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c)
    }

    /// Whether a column with this name exists.
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Numeric values of a column, widening `Int` to `f32`.
    pub fn float_values(&self, name: &str) -> Result<Vec<f32>> {
        match self.column(name) {
            Some(Column::Float(v)) => Ok(v.clone()),
            Some(Column::Int(v)) => Ok(v.iter().map(|&x| x as f32).collect()),
            Some(Column::Str(_)) => Err(DataError::TypeMismatch {
                column: name.to_string(),
                expected: "numeric values",
            }),
            None => Err(DataError::ColumnNotFound(name.to_string())),
        }
    }

    /// Row-wise grouping keys for a column of any type.
    pub fn keys(&self, name: &str) -> Result<Vec<String>> {
        let column = self
            .column(name)
            .ok_or_else(|| DataError::ColumnNotFound(name.to_string()))?;
        Ok((0..column.len()).map(|row| column.key_at(row)).collect())
    }

    /// Append a float column, or replace an existing column of that name.
    pub fn set_float_column(&mut self, name: &str, values: Vec<f32>) -> Result<()> {
        if self.width() > 0 && values.len() != self.height() {
            return Err(DataError::LengthMismatch {
                column: name.to_string(),
                expected: self.height(),
                got: values.len(),
            });
        }
        if let Some(slot) = self.columns.iter_mut().find(|(n, _)| n == name) {
            slot.1 = Column::Float(values);
        } else {
            self.columns.push((name.to_string(), Column::Float(values)));
        }
        Ok(())
    }

    /// Extract the given rows into a new frame, optionally dropping one
    /// column. Column order is preserved.
    #[must_use]
    pub fn take_rows(&self, rows: &[usize], drop: Option<&str>) -> PanelFrame {
        let columns = self
            .columns
            .iter()
            .filter(|(name, _)| drop != Some(name.as_str()))
            .map(|(name, column)| (name.clone(), column.take(rows)))
            .collect();
        PanelFrame { columns }
    }

    /// The trailing `n` rows of every column.
    #[must_use]
    pub fn tail(&self, n: usize) -> PanelFrame {
        let columns = self
            .columns
            .iter()
            .map(|(name, column)| (name.clone(), column.tail(n)))
            .collect();
        PanelFrame { columns }
    }

    /// A `(rows, names.len())` numeric block over the named columns, in the
    /// given column order.
    pub fn float_block(&self, names: &[String]) -> Result<Array2<f32>> {
        let height = self.height();
        let mut block = Array2::<f32>::zeros((height, names.len()));
        for (j, name) in names.iter().enumerate() {
            let values = self.float_values(name)?;
            for (i, value) in values.into_iter().enumerate() {
                block[[i, j]] = value;
            }
        }
        Ok(block)
    }
}
