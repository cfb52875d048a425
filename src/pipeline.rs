use ndarray::{Array1, Array2, ArrayView1, ArrayView2, s};
use tracing::debug;

use crate::{
    config::PipelineConfig,
    error::{ShapeError, TickGridResult},
    math::{pre_averaging::pre_averaging_returns, refresh_time::refresh_time_matching},
};

/// Result of one [`Pipeline::run`].
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    prices: Array2<f64>,
    price_indices: Array1<f64>,
    returns: Array2<f64>,
    indices: Array1<f64>,
}

impl PipelineOutput {
    /// The price grid the returns were computed from (synchronized if enabled).
    pub fn prices(&self) -> &Array2<f64> {
        &self.prices
    }

    /// One index entry per row of [`prices`](Self::prices).
    pub fn price_indices(&self) -> &Array1<f64> {
        &self.price_indices
    }

    /// Raw or pre-averaged returns.
    pub fn returns(&self) -> &Array2<f64> {
        &self.returns
    }

    /// For every return row, the index of the price row it ends at.
    pub fn indices(&self) -> &Array1<f64> {
        &self.indices
    }

    pub fn into_returns(self) -> (Array2<f64>, Array1<f64>) {
        (self.returns, self.indices)
    }
}

/// Runs the preparation chain described by a [`PipelineConfig`].
///
/// Every run is a pure function of its inputs; nothing is kept between runs.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> TickGridResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Turns an `N x D` price matrix with index vector `idx` into returns.
    ///
    /// # Errors
    /// * [`ShapeError::DimensionMismatch`] if `idx` does not match the rows of `prices`.
    /// * [`ShapeError::WindowTooLarge`] if the pre-averaging window exceeds the
    ///   number of prices left after synchronization.
    #[tracing::instrument(skip_all, fields(rows = prices.nrows(), cols = prices.ncols()))]
    pub fn run(
        &self,
        prices: ArrayView2<f64>,
        idx: ArrayView1<f64>,
    ) -> TickGridResult<PipelineOutput> {
        let (grid, grid_idx) = if self.config.synchronize() {
            refresh_time_matching(prices, idx)?.into_parts()
        } else {
            if idx.len() != prices.nrows() {
                return Err(ShapeError::DimensionMismatch {
                    context: "pipeline index",
                    expected: prices.nrows(),
                    actual: idx.len(),
                }
                .into());
            }
            (prices.to_owned(), idx.to_owned())
        };
        debug!(rows = grid.nrows(), "Price grid ready");

        let raw_returns = self.config.return_kind().apply(grid.view());
        let raw_indices = trailing_indices(&grid_idx, 1);

        let (returns, indices) = match self.config.pre_averaging() {
            Some(kn) => {
                let smoothed = pre_averaging_returns(raw_returns.view(), kn)?;
                let indices = trailing_indices(&grid_idx, kn.get() - 1);
                (smoothed, indices)
            }
            None => (raw_returns, raw_indices),
        };
        debug!(
            rows = returns.nrows(),
            kind = %self.config.return_kind(),
            "Returns ready"
        );

        Ok(PipelineOutput {
            prices: grid,
            price_indices: grid_idx,
            returns,
            indices,
        })
    }
}

/// Drops the first `skip` entries, or everything if there are fewer.
fn trailing_indices(idx: &Array1<f64>, skip: usize) -> Array1<f64> {
    if idx.len() <= skip {
        return Array1::zeros(0);
    }
    idx.slice(s![skip..]).to_owned()
}
