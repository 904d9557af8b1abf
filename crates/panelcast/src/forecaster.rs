//! Training orchestration and prediction assembly.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use panelcast_core::{ForecastEngine, ScalerRegistry, Seed};
use panelcast_data::{assemble, DataError, ForecastingSchema, PanelFrame};

use crate::config::ForecasterConfig;
use crate::error::{ForecastError, Result};

/// Everything retained from a successful fit, consumed at prediction time
/// and persisted alongside the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct FittedState {
    pub(crate) entity_ids: Vec<String>,
    pub(crate) targets: Vec<Vec<f32>>,
    pub(crate) past_covariates: Option<Vec<Array2<f32>>>,
    pub(crate) future_covariates: Option<Vec<Array2<f32>>>,
    pub(crate) scalers: ScalerRegistry,
}

/// A uniform train/predict interface over an external forecasting engine.
///
/// The forecaster owns the per-entity data preparation (segmentation,
/// scaling, covariate assembly) and the reassembly of scaled engine output
/// back into original measurement units; the model itself lives behind the
/// [`ForecastEngine`] seam.
///
/// # Example
///
/// ```rust,ignore
/// use panelcast::{train_forecaster, ForecasterConfig};
/// use panelcast_core::SeasonalNaive;
///
/// let forecaster = train_forecaster::<SeasonalNaive>(
///     &mut history, schema, ForecasterConfig::default(), None)?;
/// forecaster.predict(&mut test, "prediction")?;
/// ```
pub struct Forecaster<E: ForecastEngine> {
    pub(crate) engine: E,
    pub(crate) schema: ForecastingSchema,
    pub(crate) config: ForecasterConfig,
    pub(crate) state: Option<FittedState>,
}

impl<E: ForecastEngine> Forecaster<E> {
    /// Create an unfitted forecaster, constructing the engine from the
    /// resolved hyperparameters.
    pub fn new(schema: ForecastingSchema, config: ForecasterConfig) -> Result<Self> {
        let engine_config = config.resolved_engine(&schema);
        let mut engine = E::from_config(&engine_config)?;
        engine.set_seed(Seed::new(config.seed));
        tracing::info!(
            engine = engine.name(),
            accelerator = ?engine_config.accelerator,
            "initialized forecast engine"
        );
        Ok(Self {
            engine,
            schema,
            config,
            state: None,
        })
    }

    /// The schema this forecaster was built for.
    #[must_use]
    pub fn schema(&self) -> &ForecastingSchema {
        &self.schema
    }

    /// The forecaster configuration.
    #[must_use]
    pub fn config(&self) -> &ForecasterConfig {
        &self.config
    }

    /// Trailing history rows retained per entity, per the configured ratio.
    #[must_use]
    pub fn history_length(&self) -> Option<usize> {
        self.config.history_length(&self.schema)
    }

    /// Whether [`fit`](Self::fit) has completed.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.state.is_some()
    }

    /// Entity ids in fit order, once fitted.
    #[must_use]
    pub fn entity_ids(&self) -> Option<&[String]> {
        self.state.as_ref().map(|s| s.entity_ids.as_slice())
    }

    /// Train on a history panel.
    ///
    /// Seeds the engine before data preparation, assembles per-entity
    /// inputs, and delegates fitting. The test panel is required whenever
    /// the effective future covariate list is non-empty, so future blocks
    /// can span the train+test horizon. On success the forecaster retains
    /// the scaled series and scalers for prediction.
    ///
    /// Future covariate blocks are assembled and retained but not handed to
    /// the engine fit call; engines that consume them read them from the
    /// retained state.
    pub fn fit(
        &mut self,
        history: &mut PanelFrame,
        history_length: Option<usize>,
        test: Option<&mut PanelFrame>,
    ) -> Result<()> {
        self.engine.set_seed(Seed::new(self.config.seed));

        let mut scalers = ScalerRegistry::new();
        let inputs = assemble(history, test, &self.schema, history_length, &mut scalers)?;

        let past_covariates = if self.config.use_exogenous {
            inputs.past_covariates
        } else {
            None
        };

        tracing::info!(
            entities = inputs.entity_ids.len(),
            exogenous = past_covariates.is_some(),
            history_length,
            "fitting forecast engine"
        );
        self.engine.fit(&inputs.targets, past_covariates.as_deref())?;

        self.state = Some(FittedState {
            entity_ids: inputs.entity_ids,
            targets: inputs.targets,
            past_covariates,
            future_covariates: inputs.future_covariates,
            scalers,
        });
        Ok(())
    }

    /// Forecast one horizon per entity and write the de-scaled values onto
    /// `test` under `prediction_col`.
    ///
    /// Forecasts come back per entity in fit order, are inverted through
    /// each entity's own target scaler, and are flattened entity by entity.
    /// The flattened length must equal the test panel height (every entity
    /// contributing exactly `forecast_length` rows in fit order); otherwise
    /// the call fails rather than misaligning rows.
    pub fn predict(&self, test: &mut PanelFrame, prediction_col: &str) -> Result<()> {
        let state = self.state.as_ref().ok_or(ForecastError::NotFitted)?;
        let horizon = self.schema.forecast_length;

        tracing::info!(
            entities = state.entity_ids.len(),
            horizon,
            "requesting forecast"
        );
        let forecasts = self.engine.predict(
            horizon,
            &state.targets,
            state.past_covariates.as_deref(),
        )?;

        let mut flat = Vec::with_capacity(forecasts.len() * horizon);
        for (index, forecast) in forecasts.iter().enumerate() {
            flat.extend(state.scalers.inverse_transform_target(index, forecast)?);
        }

        if flat.len() != test.height() {
            return Err(DataError::SchemaMismatch(format!(
                "{} forecast rows for a test panel of height {}; each training \
                 entity must contribute exactly {horizon} test rows in fit order",
                flat.len(),
                test.height()
            ))
            .into());
        }
        test.set_float_column(prediction_col, flat)?;
        Ok(())
    }
}

/// Instantiate and train a forecaster in one call.
pub fn train_forecaster<E: ForecastEngine>(
    history: &mut PanelFrame,
    schema: ForecastingSchema,
    config: ForecasterConfig,
    test: Option<&mut PanelFrame>,
) -> Result<Forecaster<E>> {
    let mut forecaster = Forecaster::new(schema, config)?;
    let history_length = forecaster.history_length();
    forecaster.fit(history, history_length, test)?;
    Ok(forecaster)
}

/// Forecast onto `test`, writing `prediction_col`.
pub fn forecast_with<E: ForecastEngine>(
    forecaster: &Forecaster<E>,
    test: &mut PanelFrame,
    prediction_col: &str,
) -> Result<()> {
    forecaster.predict(test, prediction_col)
}
