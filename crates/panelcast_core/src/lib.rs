//! # panelcast_core
//!
//! Core types for panelcast multi-entity forecasting.
//!
//! This crate provides:
//! - [`Seed`] for deterministic random number generation
//! - [`MinMaxScaler`] and [`ScalerRegistry`] for per-entity invertible scaling
//! - [`ForecastEngine`] for plugging in an external forecasting model
//! - Error types and common utilities
//!
//! ## Data Convention
//!
//! Per-entity inputs are kept as plain sequences:
//! - targets: `Vec<f32>`, one value per time step
//! - covariate blocks: `Array2<f32>` of shape `(time steps, covariate columns)`
//!
//! ## Example
//!
//! ```rust,ignore
//! use panelcast_core::{ScalerRegistry, Seed};
//!
//! let mut scalers = ScalerRegistry::new();
//! let scaled = scalers.fit_transform_target(0, &[10.0, 20.0, 30.0])?;
//! let restored = scalers.inverse_transform_target(0, &scaled)?;
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

mod engine;
mod error;
mod scaler;
mod seed;

pub use engine::{
    Accelerator, Activation, EngineConfig, ForecastEngine, NormType, SeasonalNaive,
};
pub use error::{CoreError, Result};
pub use scaler::{MinMaxScaler, ScalerRegistry};
pub use seed::Seed;
