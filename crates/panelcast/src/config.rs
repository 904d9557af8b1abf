//! Forecaster configuration.

use serde::{Deserialize, Serialize};

use panelcast_core::EngineConfig;
use panelcast_data::ForecastingSchema;

/// Construction-time configuration for a [`Forecaster`](crate::Forecaster).
///
/// Everything that shapes a run lives here: the seed, exogenous usage, the
/// ratio-derived window lengths, and the enumerated engine hyperparameters.
/// There is no ambient process-wide state to set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecasterConfig {
    /// History window as a multiple of the forecast horizon: a ratio of 10
    /// with horizon 20 keeps the trailing 200 rows per entity. `None` keeps
    /// full histories.
    pub history_forecast_ratio: Option<usize>,
    /// Derives engine chunk lengths from the horizon:
    /// `input_chunk_length = horizon * ratio`,
    /// `output_chunk_length = horizon`. Overrides the engine fields.
    pub lags_forecast_ratio: Option<usize>,
    /// Feed past/static covariates to the engine during training. When
    /// false, prepared past covariates are dropped regardless of
    /// availability.
    pub use_exogenous: bool,
    /// Seed for all pseudo-randomness, applied before data preparation.
    pub seed: u64,
    /// Enumerated hyperparameters handed to the engine.
    pub engine: EngineConfig,
}

impl Default for ForecasterConfig {
    fn default() -> Self {
        Self {
            history_forecast_ratio: None,
            lags_forecast_ratio: None,
            use_exogenous: false,
            seed: 0,
            engine: EngineConfig::default(),
        }
    }
}

impl ForecasterConfig {
    /// Trailing history rows retained per entity, when a ratio is set.
    #[must_use]
    pub fn history_length(&self, schema: &ForecastingSchema) -> Option<usize> {
        self.history_forecast_ratio
            .map(|ratio| schema.forecast_length * ratio)
    }

    /// Engine config with ratio-derived chunk lengths applied.
    #[must_use]
    pub fn resolved_engine(&self, schema: &ForecastingSchema) -> EngineConfig {
        let mut engine = self.engine.clone();
        if let Some(ratio) = self.lags_forecast_ratio {
            engine.input_chunk_length = Some(schema.forecast_length * ratio);
            engine.output_chunk_length = Some(schema.forecast_length);
        }
        engine
    }
}
