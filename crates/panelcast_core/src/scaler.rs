//! Per-entity min-max scaling.

use std::collections::HashMap;

use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// An invertible per-column min-max transform to a fixed output range.
///
/// One scaler object covers a whole value block: each column is scaled
/// independently by its own min/max, but the block shares a single scaler
/// for fitting and inversion. Constant columns scale by 1.0 so the transform
/// stays total and invertible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinMaxScaler {
    range: (f32, f32),
    mins: Vec<f32>,
    scales: Vec<f32>,
}

impl MinMaxScaler {
    /// Create a scaler targeting the default `[0, 1]` output range.
    #[must_use]
    pub fn new() -> Self {
        Self::with_range(0.0, 1.0)
    }

    /// Create a scaler targeting the `[lo, hi]` output range.
    ///
    /// `hi` must be strictly greater than `lo`.
    #[must_use]
    pub fn with_range(lo: f32, hi: f32) -> Self {
        Self {
            range: (lo, hi),
            mins: Vec::new(),
            scales: Vec::new(),
        }
    }

    /// Whether [`fit`](Self::fit) has been called.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        !self.mins.is_empty()
    }

    /// Number of columns the scaler was fit on.
    #[must_use]
    pub fn n_columns(&self) -> usize {
        self.mins.len()
    }

    /// Fit column-wise min/max on a value block of shape `(rows, columns)`.
    pub fn fit(&mut self, block: ArrayView2<'_, f32>) -> Result<()> {
        if block.nrows() == 0 || block.ncols() == 0 {
            return Err(CoreError::EmptyBlock(format!(
                "cannot fit a min-max scaler on a {}x{} block",
                block.nrows(),
                block.ncols()
            )));
        }

        self.mins.clear();
        self.scales.clear();
        for column in block.columns() {
            let min = column.iter().copied().fold(f32::INFINITY, f32::min);
            let max = column.iter().copied().fold(f32::NEG_INFINITY, f32::max);
            let span = max - min;
            self.mins.push(min);
            self.scales.push(if span == 0.0 { 1.0 } else { span });
        }
        Ok(())
    }

    /// Scale a block into the output range, column by column.
    pub fn transform(&self, block: ArrayView2<'_, f32>) -> Result<Array2<f32>> {
        self.check_width(block.ncols())?;
        let (lo, hi) = self.range;
        let width = hi - lo;

        let mut scaled = block.to_owned();
        for (j, mut column) in scaled.columns_mut().into_iter().enumerate() {
            let min = self.mins[j];
            let scale = self.scales[j];
            column.mapv_inplace(|v| lo + (v - min) / scale * width);
        }
        Ok(scaled)
    }

    /// Fit on `block` and return the scaled block.
    pub fn fit_transform(&mut self, block: ArrayView2<'_, f32>) -> Result<Array2<f32>> {
        self.fit(block)?;
        self.transform(block)
    }

    /// Map a scaled block back to original units.
    pub fn inverse_transform(&self, block: ArrayView2<'_, f32>) -> Result<Array2<f32>> {
        self.check_width(block.ncols())?;
        let (lo, hi) = self.range;
        let width = hi - lo;

        let mut restored = block.to_owned();
        for (j, mut column) in restored.columns_mut().into_iter().enumerate() {
            let min = self.mins[j];
            let scale = self.scales[j];
            column.mapv_inplace(|v| (v - lo) / width * scale + min);
        }
        Ok(restored)
    }

    /// Fit on a 1-D value sequence, treated as a single-column block.
    pub fn fit_transform_1d(&mut self, values: &[f32]) -> Result<Vec<f32>> {
        let block = column_block(values)?;
        let scaled = self.fit_transform(block.view())?;
        Ok(scaled.column(0).to_vec())
    }

    /// Invert a 1-D scaled sequence, treated as a single-column block.
    pub fn inverse_transform_1d(&self, values: &[f32]) -> Result<Vec<f32>> {
        let block = column_block(values)?;
        let restored = self.inverse_transform(block.view())?;
        Ok(restored.column(0).to_vec())
    }

    fn check_width(&self, got: usize) -> Result<()> {
        if !self.is_fitted() {
            return Err(CoreError::ScalerNotFitted);
        }
        if got != self.mins.len() {
            return Err(CoreError::InvalidShape {
                expected: format!("{} columns", self.mins.len()),
                got: format!("{got} columns"),
            });
        }
        Ok(())
    }
}

impl Default for MinMaxScaler {
    fn default() -> Self {
        Self::new()
    }
}

/// Reshape a 1-D sequence into a single-column block.
///
/// Single columns go through the same 2-D path as multi-column blocks, so
/// 1-row and 1-column inputs behave identically to the general case.
fn column_block(values: &[f32]) -> Result<Array2<f32>> {
    Array2::from_shape_vec((values.len(), 1), values.to_vec()).map_err(|e| {
        CoreError::InvalidShape {
            expected: format!("{}x1", values.len()),
            got: e.to_string(),
        }
    })
}

/// Per-entity scaler bookkeeping for a fitted forecaster.
///
/// Scalers are keyed by the stable per-entity index assigned in fit order,
/// not by entity-ID text; the index assignment must be deterministic and
/// identical between fit and inversion. Targets, past/static blocks, and
/// future blocks each get their own store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScalerRegistry {
    target: HashMap<usize, MinMaxScaler>,
    past: HashMap<usize, MinMaxScaler>,
    future: HashMap<usize, MinMaxScaler>,
}

impl ScalerRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entities with a fitted target scaler.
    #[must_use]
    pub fn target_count(&self) -> usize {
        self.target.len()
    }

    /// Fit a fresh target scaler for `index` and return the scaled sequence.
    pub fn fit_transform_target(&mut self, index: usize, values: &[f32]) -> Result<Vec<f32>> {
        let mut scaler = MinMaxScaler::new();
        let scaled = scaler.fit_transform_1d(values)?;
        self.target.insert(index, scaler);
        Ok(scaled)
    }

    /// Invert a scaled target sequence through the scaler fit for `index`.
    pub fn inverse_transform_target(&self, index: usize, scaled: &[f32]) -> Result<Vec<f32>> {
        let scaler = self
            .target
            .get(&index)
            .ok_or(CoreError::MissingScaler { index })?;
        scaler.inverse_transform_1d(scaled)
    }

    /// Fit a fresh past/static-covariate scaler for `index` and return the
    /// scaled block.
    pub fn fit_transform_past(
        &mut self,
        index: usize,
        block: ArrayView2<'_, f32>,
    ) -> Result<Array2<f32>> {
        let mut scaler = MinMaxScaler::new();
        let scaled = scaler.fit_transform(block)?;
        self.past.insert(index, scaler);
        Ok(scaled)
    }

    /// Fit a fresh future-covariate scaler for `index` and return the scaled
    /// block. Fit across the full train+test concatenation for that entity.
    pub fn fit_transform_future(
        &mut self,
        index: usize,
        block: ArrayView2<'_, f32>,
    ) -> Result<Array2<f32>> {
        let mut scaler = MinMaxScaler::new();
        let scaled = scaler.fit_transform(block)?;
        self.future.insert(index, scaler);
        Ok(scaled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_fit_transform_bounds() {
        let mut scaler = MinMaxScaler::new();
        let block = array![[1.0], [2.0], [3.0], [4.0], [5.0]];
        let scaled = scaler.fit_transform(block.view()).unwrap();
        assert!((scaled[[0, 0]] - 0.0).abs() < 1e-6);
        assert!((scaled[[4, 0]] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_round_trip() {
        let mut scaler = MinMaxScaler::new();
        let values = [13.5, -2.0, 88.25, 40.0, 40.0];
        let scaled = scaler.fit_transform_1d(&values).unwrap();
        let restored = scaler.inverse_transform_1d(&scaled).unwrap();
        for (orig, back) in values.iter().zip(&restored) {
            assert!((orig - back).abs() < 1e-4);
        }
    }

    #[test]
    fn test_columns_scaled_independently() {
        let mut scaler = MinMaxScaler::new();
        let block = array![[0.0, 100.0], [5.0, 300.0], [10.0, 200.0]];
        let scaled = scaler.fit_transform(block.view()).unwrap();
        assert!((scaled[[1, 0]] - 0.5).abs() < 1e-6);
        assert!((scaled[[2, 1]] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_constant_column() {
        let mut scaler = MinMaxScaler::new();
        let values = [4.0, 4.0, 4.0];
        let scaled = scaler.fit_transform_1d(&values).unwrap();
        assert!(scaled.iter().all(|v| v.abs() < 1e-6));
        let restored = scaler.inverse_transform_1d(&scaled).unwrap();
        assert!(restored.iter().all(|v| (v - 4.0).abs() < 1e-6));
    }

    #[test]
    fn test_single_row_single_column() {
        // A 1-row block from a single covariate column must fit cleanly.
        let mut scaler = MinMaxScaler::new();
        let scaled = scaler.fit_transform_1d(&[7.0]).unwrap();
        assert_eq!(scaled.len(), 1);
    }

    #[test]
    fn test_transform_width_mismatch() {
        let mut scaler = MinMaxScaler::new();
        scaler.fit(array![[1.0, 2.0], [3.0, 4.0]].view()).unwrap();
        let err = scaler.transform(array![[1.0], [2.0]].view()).unwrap_err();
        assert!(matches!(err, CoreError::InvalidShape { .. }));
    }

    #[test]
    fn test_registry_round_trip() {
        let mut registry = ScalerRegistry::new();
        let values = [10.0, 20.0, 30.0];
        let scaled = registry.fit_transform_target(0, &values).unwrap();
        let restored = registry.inverse_transform_target(0, &scaled).unwrap();
        for (orig, back) in values.iter().zip(&restored) {
            assert!((orig - back).abs() < 1e-4);
        }
    }

    #[test]
    fn test_registry_missing_scaler() {
        let registry = ScalerRegistry::new();
        let err = registry.inverse_transform_target(3, &[0.5]).unwrap_err();
        assert!(matches!(err, CoreError::MissingScaler { index: 3 }));
    }

    #[test]
    fn test_registry_serde_round_trip() {
        let mut registry = ScalerRegistry::new();
        registry.fit_transform_target(0, &[1.0, 2.0]).unwrap();
        registry
            .fit_transform_past(0, array![[1.0, 5.0], [2.0, 6.0]].view())
            .unwrap();

        let json = serde_json::to_string(&registry).unwrap();
        let restored: ScalerRegistry = serde_json::from_str(&json).unwrap();
        let inverted = restored.inverse_transform_target(0, &[0.0, 1.0]).unwrap();
        assert!((inverted[0] - 1.0).abs() < 1e-6);
        assert!((inverted[1] - 2.0).abs() < 1e-6);
    }
}
