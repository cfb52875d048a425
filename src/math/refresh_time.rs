use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis, Zip};
use tracing::debug;

use crate::{
    error::{ShapeError, TickGridResult},
    math::missing::{MISSING, MissingExt},
};

/// A refresh-time synchronized grid: fully observed rows paired 1:1 with
/// the index entries of the input rows that completed them.
#[derive(Debug, Clone, PartialEq)]
pub struct RefreshTimeMatch {
    data: Array2<f64>,
    indices: Array1<f64>,
}

impl RefreshTimeMatch {
    fn empty(cols: usize) -> Self {
        Self {
            data: Array2::zeros((0, cols)),
            indices: Array1::zeros(0),
        }
    }

    /// The synchronized observations, one row per refresh instant.
    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }

    /// The index entry (timestamp or tick number) of every refresh instant.
    pub fn indices(&self) -> &Array1<f64> {
        &self.indices
    }

    pub fn into_parts(self) -> (Array2<f64>, Array1<f64>) {
        (self.data, self.indices)
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Synchronizes an `N x D` observation matrix on refresh times.
///
/// Each column keeps its latest value seen since the previous emission. As
/// soon as every column has received at least one fresh value, the pending
/// row is emitted at the current row's index and the pending state is reset
/// to missing. Rows that never complete a refresh are dropped, so the result
/// has at most `N` rows, all of them free of missing markers, in input order.
///
/// Row `0` is emitted directly if it is already fully observed; otherwise it
/// only seeds the pending state.
///
/// # Errors
/// * [`ShapeError::DimensionMismatch`] if `idx` does not have one entry per row.
/// * [`ShapeError::Empty`] if `x` has no columns.
///
/// # Example
/// ```
/// use ndarray::array;
/// use tickgrid::prelude::*;
///
/// let x = array![[1.0, MISSING], [MISSING, 2.0], [3.0, 4.0]];
/// let idx = array![10.0, 20.0, 30.0];
///
/// let rt = refresh_time_matching(x.view(), idx.view()).unwrap();
/// assert_eq!(rt.data(), &array![[1.0, 2.0], [3.0, 4.0]]);
/// assert_eq!(rt.indices(), &array![20.0, 30.0]);
/// ```
#[tracing::instrument(skip_all, fields(rows = x.nrows(), cols = x.ncols()))]
pub fn refresh_time_matching(
    x: ArrayView2<f64>,
    idx: ArrayView1<f64>,
) -> TickGridResult<RefreshTimeMatch> {
    let (n_rows, n_cols) = x.dim();
    if idx.len() != n_rows {
        return Err(ShapeError::DimensionMismatch {
            context: "refresh_time_matching index",
            expected: n_rows,
            actual: idx.len(),
        }
        .into());
    }
    if n_cols == 0 {
        return Err(ShapeError::Empty("refresh_time_matching requires at least one column").into());
    }
    if n_rows == 0 {
        return Ok(RefreshTimeMatch::empty(n_cols));
    }

    let mut emitted_at: Vec<usize> = Vec::new();
    let mut emitted_rows: Vec<Array1<f64>> = Vec::new();

    let mut pending = x.row(0).to_owned();
    if pending.view().is_complete() {
        emitted_at.push(0);
        emitted_rows.push(pending.clone());
        pending.fill(MISSING);
    }

    for (n, row) in x.outer_iter().enumerate().skip(1) {
        Zip::from(&mut pending).and(&row).for_each(|p, &v| {
            if v.is_complete() {
                *p = v;
            }
        });

        if pending.view().is_complete() {
            emitted_at.push(n);
            emitted_rows.push(pending.clone());
            pending.fill(MISSING);
        }
    }

    // Only complete rows are ever pushed, so no partially missing row survives.
    let mut data = Array2::from_elem((emitted_rows.len(), n_cols), MISSING);
    for (mut dst, src) in data.outer_iter_mut().zip(&emitted_rows) {
        dst.assign(src);
    }
    let indices = idx.select(Axis(0), &emitted_at);

    debug!(
        emitted = emitted_at.len(),
        dropped = n_rows - emitted_at.len(),
        "Refresh time sampling complete"
    );

    Ok(RefreshTimeMatch { data, indices })
}
