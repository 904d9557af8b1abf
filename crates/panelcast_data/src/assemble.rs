//! Covariate assembly: the bridge from a raw panel to engine inputs.

use std::collections::HashMap;

use ndarray::Array2;

use panelcast_core::ScalerRegistry;

use crate::calendar::append_calendar_features;
use crate::error::{DataError, Result};
use crate::frame::PanelFrame;
use crate::schema::ForecastingSchema;
use crate::segment::{segment_by_entity, EntitySlice};

/// Per-entity engine inputs, as three parallel lists in training entity
/// order (first occurrence in the history panel).
#[derive(Debug, Clone)]
pub struct PanelInputs {
    /// Entity ids, one per series, in fit order.
    pub entity_ids: Vec<String>,
    /// Scaled target sequences.
    pub targets: Vec<Vec<f32>>,
    /// Scaled past/static covariate blocks, or `None` when no past or
    /// static covariates are declared.
    pub past_covariates: Option<Vec<Array2<f32>>>,
    /// Scaled future covariate blocks spanning train+test rows, or `None`
    /// when the effective future covariate list is empty.
    pub future_covariates: Option<Vec<Array2<f32>>>,
}

/// Turn a history panel (and, when future covariates are in play, its paired
/// test panel) into per-entity engine inputs, fitting one fresh scaler per
/// entity and value block into `registry`.
///
/// Calendar features are derived onto both frames before segmentation, and
/// their column names join the effective future covariate list. Entity
/// correspondence between the two panels is by id, after both are segmented
/// in first-occurrence order; the two id sets must be equal.
pub fn assemble(
    history: &mut PanelFrame,
    mut test: Option<&mut PanelFrame>,
    schema: &ForecastingSchema,
    history_length: Option<usize>,
    registry: &mut ScalerRegistry,
) -> Result<PanelInputs> {
    schema.validate(history)?;
    if let Some(frame) = test.as_deref() {
        schema.validate_test(frame)?;
    }

    let mut future_names = schema.future_covariates.clone();
    if schema.time_col_kind.is_calendar() {
        let (year_name, month_name) = append_calendar_features(history, &schema.time_col)?;
        if let Some(frame) = test.as_deref_mut() {
            append_calendar_features(frame, &schema.time_col)?;
        }
        future_names.push(year_name);
        future_names.push(month_name);
    }

    let train_slices = segment_by_entity(history, &schema.id_col, history_length)?;
    let past_names = schema.past_static_union();

    let mut entity_ids = Vec::with_capacity(train_slices.len());
    let mut targets = Vec::with_capacity(train_slices.len());
    let mut past = Vec::new();
    for (index, slice) in train_slices.iter().enumerate() {
        let raw = slice.frame.float_values(&schema.target_col)?;
        targets.push(registry.fit_transform_target(index, &raw)?);

        if !past_names.is_empty() {
            let block = slice.frame.float_block(&past_names)?;
            past.push(registry.fit_transform_past(index, block.view())?);
        }
        entity_ids.push(slice.id.clone());
    }

    let mut future = Vec::new();
    if !future_names.is_empty() {
        let test = test.as_deref().ok_or_else(|| {
            DataError::SchemaMismatch(
                "future covariates declared but no test panel supplied".to_string(),
            )
        })?;
        let test_slices = segment_by_entity(test, &schema.id_col, None)?;
        let test_by_id: HashMap<&str, &EntitySlice> = test_slices
            .iter()
            .map(|slice| (slice.id.as_str(), slice))
            .collect();
        if test_slices.len() != train_slices.len() {
            return Err(DataError::SchemaMismatch(format!(
                "test panel has {} entities, training panel has {}",
                test_slices.len(),
                train_slices.len()
            )));
        }

        for (index, slice) in train_slices.iter().enumerate() {
            let paired = test_by_id.get(slice.id.as_str()).ok_or_else(|| {
                DataError::SchemaMismatch(format!(
                    "entity {:?} missing from test panel",
                    slice.id
                ))
            })?;
            let block = stacked_block(&slice.frame, &paired.frame, &future_names)?;
            future.push(registry.fit_transform_future(index, block.view())?);
        }
    }

    Ok(PanelInputs {
        entity_ids,
        targets,
        past_covariates: if past.is_empty() { None } else { Some(past) },
        future_covariates: if future.is_empty() { None } else { Some(future) },
    })
}

/// One numeric block over `names`, training rows first, test rows below.
fn stacked_block(
    train: &PanelFrame,
    test: &PanelFrame,
    names: &[String],
) -> Result<Array2<f32>> {
    let rows = train.height() + test.height();
    let mut block = Array2::<f32>::zeros((rows, names.len()));
    for (j, name) in names.iter().enumerate() {
        let head = train.float_values(name)?;
        let tail = test.float_values(name)?;
        for (i, value) in head.into_iter().chain(tail).enumerate() {
            block[[i, j]] = value;
        }
    }
    Ok(block)
}
