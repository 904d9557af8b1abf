//! Forecasting problem description.

use serde::{Deserialize, Serialize};

use crate::error::{DataError, Result};
use crate::frame::PanelFrame;

/// How the time column is to be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeColumnKind {
    /// A plain integer step index with no calendar meaning.
    Index,
    /// A calendar date.
    Date,
    /// A calendar date with time of day.
    DateTime,
}

impl TimeColumnKind {
    /// Whether calendar features can be derived from this column.
    #[must_use]
    pub fn is_calendar(&self) -> bool {
        matches!(self, TimeColumnKind::Date | TimeColumnKind::DateTime)
    }
}

/// The schema of a multi-entity forecasting panel.
///
/// Names the structural columns, the forecast horizon, and the declared
/// covariate columns (each list possibly empty).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastingSchema {
    /// Column whose value partitions the panel into independent series.
    pub id_col: String,
    /// Column holding the time step or timestamp.
    pub time_col: String,
    /// Interpretation of the time column.
    pub time_col_kind: TimeColumnKind,
    /// Column holding the value to forecast.
    pub target_col: String,
    /// Number of future steps to predict per entity.
    pub forecast_length: usize,
    /// Features known only up to the current step.
    pub past_covariates: Vec<String>,
    /// Features known ahead for the forecast horizon.
    pub future_covariates: Vec<String>,
    /// Features constant across time for a given entity.
    pub static_covariates: Vec<String>,
}

impl ForecastingSchema {
    /// Create a schema with no covariates declared.
    #[must_use]
    pub fn new(
        id_col: impl Into<String>,
        time_col: impl Into<String>,
        time_col_kind: TimeColumnKind,
        target_col: impl Into<String>,
        forecast_length: usize,
    ) -> Self {
        Self {
            id_col: id_col.into(),
            time_col: time_col.into(),
            time_col_kind,
            target_col: target_col.into(),
            forecast_length,
            past_covariates: Vec::new(),
            future_covariates: Vec::new(),
            static_covariates: Vec::new(),
        }
    }

    /// Declare past covariate columns.
    #[must_use]
    pub fn with_past_covariates(mut self, columns: Vec<String>) -> Self {
        self.past_covariates = columns;
        self
    }

    /// Declare future covariate columns.
    #[must_use]
    pub fn with_future_covariates(mut self, columns: Vec<String>) -> Self {
        self.future_covariates = columns;
        self
    }

    /// Declare static covariate columns.
    #[must_use]
    pub fn with_static_covariates(mut self, columns: Vec<String>) -> Self {
        self.static_covariates = columns;
        self
    }

    /// Past and static covariates form one input block; both are only known
    /// over the training window.
    #[must_use]
    pub fn past_static_union(&self) -> Vec<String> {
        let mut union = self.past_covariates.clone();
        union.extend(self.static_covariates.iter().cloned());
        union
    }

    /// Check the training panel satisfies this schema.
    pub fn validate(&self, frame: &PanelFrame) -> Result<()> {
        if self.forecast_length == 0 {
            return Err(DataError::SchemaMismatch(
                "forecast_length must be positive".to_string(),
            ));
        }
        let required = [&self.id_col, &self.time_col, &self.target_col]
            .into_iter()
            .chain(&self.past_covariates)
            .chain(&self.future_covariates)
            .chain(&self.static_covariates);
        require_columns(frame, required, "training panel")
    }

    /// Check a paired test panel carries what covariate alignment needs: the
    /// id column, the time column, and every declared future covariate.
    pub fn validate_test(&self, frame: &PanelFrame) -> Result<()> {
        let required = [&self.id_col, &self.time_col]
            .into_iter()
            .chain(&self.future_covariates);
        require_columns(frame, required, "test panel")
    }
}

fn require_columns<'a>(
    frame: &PanelFrame,
    names: impl Iterator<Item = &'a String>,
    what: &str,
) -> Result<()> {
    let missing: Vec<&str> = names
        .filter(|name| !frame.has_column(name))
        .map(String::as_str)
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(DataError::SchemaMismatch(format!(
            "columns missing from {what}: {}",
            missing.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Column;

    fn frame() -> PanelFrame {
        PanelFrame::new(vec![
            ("id".to_string(), Column::Str(vec!["a".into()])),
            ("t".to_string(), Column::Int(vec![0])),
            ("y".to_string(), Column::Float(vec![1.0])),
            ("price".to_string(), Column::Float(vec![2.0])),
        ])
        .unwrap()
    }

    fn schema() -> ForecastingSchema {
        ForecastingSchema::new("id", "t", TimeColumnKind::Index, "y", 3)
    }

    #[test]
    fn test_validate_accepts_matching_frame() {
        schema().validate(&frame()).unwrap();
    }

    #[test]
    fn test_validate_reports_missing_covariate() {
        let schema = schema().with_past_covariates(vec!["promo".to_string()]);
        let err = schema.validate(&frame()).unwrap_err();
        assert!(matches!(err, DataError::SchemaMismatch(_)));
        assert!(err.to_string().contains("promo"));
    }

    #[test]
    fn test_validate_rejects_zero_horizon() {
        let mut schema = schema();
        schema.forecast_length = 0;
        assert!(schema.validate(&frame()).is_err());
    }

    #[test]
    fn test_past_static_union_order() {
        let schema = schema()
            .with_past_covariates(vec!["price".to_string()])
            .with_static_covariates(vec!["region".to_string()]);
        assert_eq!(schema.past_static_union(), vec!["price", "region"]);
    }

    #[test]
    fn test_schema_serde_round_trip() {
        let schema = schema().with_future_covariates(vec!["holiday".to_string()]);
        let json = serde_json::to_string(&schema).unwrap();
        let restored: ForecastingSchema = serde_json::from_str(&json).unwrap();
        assert_eq!(schema, restored);
    }
}
