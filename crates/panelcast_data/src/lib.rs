//! # panelcast_data
//!
//! Panel data handling for panelcast multi-entity forecasting.
//!
//! This crate provides:
//! - [`PanelFrame`] for ordered, named-column panel tables
//! - [`ForecastingSchema`] describing the forecasting problem
//! - [`segment_by_entity`] for per-entity slicing in first-occurrence order
//! - Calendar feature derivation from timestamp columns
//! - [`assemble`] to turn a raw panel into per-entity engine inputs
//!
//! ## Example
//!
//! ```rust,ignore
//! use panelcast_data::{assemble, segment_by_entity, ForecastingSchema, PanelFrame};
//! use panelcast_core::ScalerRegistry;
//!
//! let mut scalers = ScalerRegistry::new();
//! let inputs = assemble(&mut history, Some(&mut test), &schema, None, &mut scalers)?;
//! assert_eq!(inputs.entity_ids.len(), inputs.targets.len());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

mod assemble;
mod calendar;
mod error;
mod frame;
#[cfg(feature = "polars-io")]
mod io;
mod schema;
mod segment;

pub use assemble::{assemble, PanelInputs};
pub use calendar::{append_calendar_features, month_column_name, year_column_name};
pub use error::{DataError, Result};
pub use frame::{Column, PanelFrame};
#[cfg(feature = "polars-io")]
pub use io::read_panel_csv;
pub use schema::{ForecastingSchema, TimeColumnKind};
pub use segment::{segment_by_entity, EntitySlice};
