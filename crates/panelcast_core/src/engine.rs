//! The seam to the external forecasting engine.
//!
//! panelcast owns data preparation and prediction assembly; the model itself
//! (architecture, optimizer, training loop) lives behind [`ForecastEngine`].
//! Engines receive already-scaled per-entity series and return one forecast
//! sequence per series in the same order.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::seed::Seed;

/// Coarse accelerator selection. Anything finer-grained (device ids, batch
/// placement) is an engine's own business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Accelerator {
    /// Use a GPU when one is available, otherwise fall back to CPU.
    Auto,
    /// Force CPU execution.
    Cpu,
    /// Require GPU execution.
    Gpu,
}

/// Feed-forward activation understood by transformer-style engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Activation {
    /// Rectified linear unit.
    Relu,
    /// Gaussian error linear unit.
    Gelu,
}

/// Layer normalization variant understood by transformer-style engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NormType {
    /// Standard LayerNorm.
    LayerNorm,
    /// Root-mean-square norm.
    RmsNorm,
    /// LayerNorm without a bias term.
    LayerNormNoBias,
}

/// Enumerated engine hyperparameters.
///
/// Every recognized knob is a named field. Options specific to one engine
/// implementation go through the explicit `extra` escape hatch instead of an
/// unchecked passthrough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Number of past time steps consumed per input chunk.
    pub input_chunk_length: Option<usize>,
    /// Number of time steps emitted per output chunk.
    pub output_chunk_length: Option<usize>,
    /// Width of the encoder/decoder representation.
    pub d_model: usize,
    /// Number of attention heads.
    pub n_heads: usize,
    /// Number of encoder layers.
    pub n_encoder_layers: usize,
    /// Number of decoder layers.
    pub n_decoder_layers: usize,
    /// Dimension of the feed-forward network.
    pub d_ff: usize,
    /// Dropout fraction.
    pub dropout: f32,
    /// Feed-forward activation.
    pub activation: Activation,
    /// Layer normalization variant; `None` selects the engine default.
    pub norm_type: Option<NormType>,
    /// Optimizer learning rate; `None` selects the engine default.
    pub learning_rate: Option<f64>,
    /// Coarse accelerator selection.
    pub accelerator: Accelerator,
    /// Engine-specific options with no named field above.
    pub extra: BTreeMap<String, String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            input_chunk_length: None,
            output_chunk_length: None,
            d_model: 64,
            n_heads: 4,
            n_encoder_layers: 3,
            n_decoder_layers: 3,
            d_ff: 512,
            dropout: 0.1,
            activation: Activation::Relu,
            norm_type: None,
            learning_rate: None,
            accelerator: Accelerator::Auto,
            extra: BTreeMap::new(),
        }
    }
}

/// An external global forecasting model.
///
/// `targets` is one scaled value sequence per entity; `past_covariates`,
/// when present, is one scaled `(time steps, columns)` block per entity in
/// the same order. [`predict`](Self::predict) returns one forecast of length
/// `horizon` per entity, again in input order and in scaled units.
///
/// Input validation (sequence lengths, covariate alignment) is the engine's
/// own; errors it raises propagate to the caller uninterpreted.
pub trait ForecastEngine: Sized {
    /// Construct an engine from the enumerated hyperparameters.
    fn from_config(config: &EngineConfig) -> Result<Self>;

    /// Seed the engine's pseudo-randomness. Deterministic engines may ignore
    /// this.
    fn set_seed(&mut self, _seed: Seed) {}

    /// Train on the given series.
    fn fit(
        &mut self,
        targets: &[Vec<f32>],
        past_covariates: Option<&[Array2<f32>]>,
    ) -> Result<()>;

    /// Forecast `horizon` steps for each series.
    fn predict(
        &self,
        horizon: usize,
        targets: &[Vec<f32>],
        past_covariates: Option<&[Array2<f32>]>,
    ) -> Result<Vec<Vec<f32>>>;

    /// Persist engine weights/architecture under `dir`.
    fn save(&self, dir: &Path) -> Result<()>;

    /// Restore an engine previously saved under `dir`.
    fn load(dir: &Path) -> Result<Self>;

    /// Engine name for logging.
    fn name(&self) -> &'static str;
}

/// Engine state file name used by [`SeasonalNaive`].
const SEASONAL_NAIVE_FILE: &str = "engine.json";

/// Reference engine: repeats the last observed season of each series.
///
/// `season_length = 1` is a plain last-value carry-forward. Deterministic and
/// dependency-free; stands in for a deep-learning engine in tests and smoke
/// runs of the surrounding pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalNaive {
    season_length: usize,
}

impl SeasonalNaive {
    /// Create an engine repeating the trailing `season_length` values.
    pub fn new(season_length: usize) -> Result<Self> {
        if season_length == 0 {
            return Err(CoreError::Engine(
                "season_length must be positive".to_string(),
            ));
        }
        Ok(Self { season_length })
    }

    /// The configured season length.
    #[must_use]
    pub fn season_length(&self) -> usize {
        self.season_length
    }
}

impl ForecastEngine for SeasonalNaive {
    fn from_config(config: &EngineConfig) -> Result<Self> {
        let season_length = match config.extra.get("season_length") {
            Some(raw) => raw.parse().map_err(|_| {
                CoreError::Engine(format!("invalid season_length option: {raw:?}"))
            })?,
            None => 1,
        };
        Self::new(season_length)
    }

    fn fit(
        &mut self,
        targets: &[Vec<f32>],
        past_covariates: Option<&[Array2<f32>]>,
    ) -> Result<()> {
        if targets.is_empty() {
            return Err(CoreError::Engine("no series to fit".to_string()));
        }
        if let Some(empty) = targets.iter().position(Vec::is_empty) {
            return Err(CoreError::Engine(format!(
                "series {empty} has no observations"
            )));
        }
        if let Some(past) = past_covariates {
            if past.len() != targets.len() {
                return Err(CoreError::Engine(format!(
                    "{} past-covariate blocks for {} series",
                    past.len(),
                    targets.len()
                )));
            }
            for (i, (series, block)) in targets.iter().zip(past).enumerate() {
                if block.nrows() != series.len() {
                    return Err(CoreError::Engine(format!(
                        "series {i}: {} covariate rows for {} observations",
                        block.nrows(),
                        series.len()
                    )));
                }
            }
        }
        Ok(())
    }

    fn predict(
        &self,
        horizon: usize,
        targets: &[Vec<f32>],
        _past_covariates: Option<&[Array2<f32>]>,
    ) -> Result<Vec<Vec<f32>>> {
        targets
            .iter()
            .enumerate()
            .map(|(i, series)| {
                if series.is_empty() {
                    return Err(CoreError::Engine(format!(
                        "series {i} has no observations"
                    )));
                }
                let start = series.len().saturating_sub(self.season_length);
                let season = &series[start..];
                Ok((0..horizon).map(|t| season[t % season.len()]).collect())
            })
            .collect()
    }

    fn save(&self, dir: &Path) -> Result<()> {
        let file = File::create(dir.join(SEASONAL_NAIVE_FILE))?;
        let writer = BufWriter::new(file);
        serde_json::to_writer(writer, self)
            .map_err(|e| CoreError::SerializationError(e.to_string()))
    }

    fn load(dir: &Path) -> Result<Self> {
        let file = File::open(dir.join(SEASONAL_NAIVE_FILE))?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|e| CoreError::SerializationError(e.to_string()))
    }

    fn name(&self) -> &'static str {
        "SeasonalNaive"
    }
}
