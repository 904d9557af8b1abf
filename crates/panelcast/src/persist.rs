//! Saving and loading trained forecasters.
//!
//! A trained instance persists as two artifacts in one directory: the
//! engine's own weights (format engine-defined) and a JSON snapshot of the
//! remaining state. Both are required; loading re-links a freshly restored
//! engine into the restored snapshot.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use panelcast_core::ForecastEngine;
use panelcast_data::ForecastingSchema;

use crate::config::ForecasterConfig;
use crate::error::{ForecastError, Result};
use crate::forecaster::{FittedState, Forecaster};

/// Snapshot file name.
const FORECASTER_STATE_FILE: &str = "forecaster.json";

#[derive(Serialize, Deserialize)]
struct ForecasterSnapshot {
    schema: ForecastingSchema,
    config: ForecasterConfig,
    state: FittedState,
}

impl<E: ForecastEngine> Forecaster<E> {
    /// Persist a trained forecaster under `dir`.
    ///
    /// Fails with [`ForecastError::NotFitted`] before training completes.
    pub fn save(&self, dir: &Path) -> Result<()> {
        let state = self.state.as_ref().ok_or(ForecastError::NotFitted)?;
        fs::create_dir_all(dir)?;

        self.engine.save(dir)?;
        let snapshot = ForecasterSnapshot {
            schema: self.schema.clone(),
            config: self.config.clone(),
            state: state.clone(),
        };
        save_json(&dir.join(FORECASTER_STATE_FILE), &snapshot)?;
        tracing::info!(dir = %dir.display(), engine = self.engine.name(), "saved forecaster");
        Ok(())
    }

    /// Restore a forecaster previously saved under `dir`.
    pub fn load(dir: &Path) -> Result<Self> {
        let snapshot: ForecasterSnapshot = load_json(&dir.join(FORECASTER_STATE_FILE))?;
        let engine = E::load(dir)?;
        Ok(Self {
            engine,
            schema: snapshot.schema,
            config: snapshot.config,
            state: Some(snapshot.state),
        })
    }
}

/// Persist a trained forecaster under `dir`.
pub fn save_forecaster<E: ForecastEngine>(forecaster: &Forecaster<E>, dir: &Path) -> Result<()> {
    forecaster.save(dir)
}

/// Restore a forecaster previously saved under `dir`.
pub fn load_forecaster<E: ForecastEngine>(dir: &Path) -> Result<Forecaster<E>> {
    Forecaster::load(dir)
}

fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, value)
        .map_err(|e| ForecastError::SerializationError(e.to_string()))
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|e| ForecastError::SerializationError(e.to_string()))
}
