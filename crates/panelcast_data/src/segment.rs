//! Per-entity panel segmentation.

use std::collections::HashMap;

use crate::error::Result;
use crate::frame::PanelFrame;

/// One entity's slice of a panel, with the id column removed.
#[derive(Debug, Clone)]
pub struct EntitySlice {
    /// The entity's grouping key.
    pub id: String,
    /// That entity's rows, in source order.
    pub frame: PanelFrame,
}

/// Split a panel into per-entity sub-frames.
///
/// Entities come out in first-occurrence order of the id column, each
/// sub-frame excluding the id column and preserving source row order.
/// `history_length` keeps only the trailing rows of each slice. The same
/// truncation must be applied whenever series are re-derived from the same
/// panel, so covariates stay aligned with the fitted window.
pub fn segment_by_entity(
    frame: &PanelFrame,
    id_col: &str,
    history_length: Option<usize>,
) -> Result<Vec<EntitySlice>> {
    let keys = frame.keys(id_col)?;

    let mut order: Vec<String> = Vec::new();
    let mut rows_by_id: HashMap<String, Vec<usize>> = HashMap::new();
    for (row, key) in keys.into_iter().enumerate() {
        rows_by_id
            .entry(key.clone())
            .or_insert_with(|| {
                order.push(key);
                Vec::new()
            })
            .push(row);
    }

    let mut slices = Vec::with_capacity(order.len());
    for id in order {
        let rows = &rows_by_id[&id];
        let mut sub = frame.take_rows(rows, Some(id_col));
        if let Some(limit) = history_length {
            if sub.height() > limit {
                sub = sub.tail(limit);
            }
        }
        slices.push(EntitySlice { id, frame: sub });
    }
    Ok(slices)
}
