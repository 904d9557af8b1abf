//! # panelcast
//!
//! A uniform train/predict/save/load interface over external global
//! time-series forecasting engines.
//!
//! panelcast adapts a multi-entity panel table into the per-series inputs a
//! forecasting engine consumes, and reassembles scaled engine output back
//! into the original measurement space:
//!
//! - per-entity segmentation in first-occurrence order
//! - per-entity invertible min-max scaling of targets and covariate blocks
//! - calendar feature derivation and past/future covariate alignment
//! - fitted-state retention and two-artifact persistence
//!
//! The engine itself (architecture, optimizer, training loop) is a
//! collaborator behind [`panelcast_core::ForecastEngine`].
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use panelcast::{train_forecaster, ForecasterConfig};
//! use panelcast_core::SeasonalNaive;
//! use panelcast_data::{ForecastingSchema, TimeColumnKind};
//!
//! let schema = ForecastingSchema::new("store", "date", TimeColumnKind::Date, "sales", 7);
//! let forecaster = train_forecaster::<SeasonalNaive>(
//!     &mut history, schema, ForecasterConfig::default(), Some(&mut test))?;
//! forecaster.predict(&mut test, "prediction")?;
//! forecaster.save(Path::new("./model"))?;
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
mod error;
mod forecaster;
mod persist;

pub use config::ForecasterConfig;
pub use error::{ForecastError, Result};
pub use forecaster::{forecast_with, train_forecaster, Forecaster};
pub use persist::{load_forecaster, save_forecaster};

// Re-export the crates a downstream caller needs to drive the facade.
pub use panelcast_core as core;
pub use panelcast_data as data;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{
        forecast_with, load_forecaster, save_forecaster, train_forecaster, ForecastError,
        Forecaster, ForecasterConfig,
    };
    pub use panelcast_core::{
        Accelerator, EngineConfig, ForecastEngine, MinMaxScaler, ScalerRegistry, SeasonalNaive,
        Seed,
    };
    pub use panelcast_data::{
        assemble, segment_by_entity, Column, ForecastingSchema, PanelFrame, TimeColumnKind,
    };
}
