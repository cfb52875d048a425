use ndarray::{Array1, Array2, ArrayView1, ArrayView2, s};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::{
    error::{ShapeError, TickGridResult},
    impl_window_newtype,
    math::missing::{MISSING, MissingExt},
};

/// Number of consecutive rows multiplied by [`roll_apply_prod`].
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProductWindow(pub usize);

impl_window_newtype!(ProductWindow);

/// Block length used by [`tick_grouping`].
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupSize(pub usize);

impl_window_newtype!(GroupSize);

/// Reduces every column over each run of `len` consecutive rows.
///
/// Output row `i` covers input rows `i ..= i + len - 1`; an input shorter
/// than the window yields `0 x D`.
fn reduce_windows<F>(x: ArrayView2<f64>, len: usize, reduce: F) -> Array2<f64>
where
    F: Fn(ArrayView1<f64>) -> f64,
{
    let (n_rows, n_cols) = x.dim();
    let n_out = (n_rows + 1).saturating_sub(len);
    Array2::from_shape_fn((n_out, n_cols), |(i, j)| reduce(x.slice(s![i..i + len, j])))
}

fn window_min(w: ArrayView1<f64>) -> f64 {
    if w.is_missing() {
        return MISSING;
    }
    w.iter().copied().fold(f64::INFINITY, f64::min)
}

/// Middle element of an odd-length window.
fn window_median(w: ArrayView1<f64>) -> f64 {
    if w.is_missing() || w.is_empty() {
        return MISSING;
    }
    let mut sorted: SmallVec<[OrderedFloat<f64>; 3]> = w.iter().copied().map(OrderedFloat).collect();
    sorted.sort_unstable();

    sorted[sorted.len() / 2].0
}

/// Column-wise minimum of each pair of adjacent rows; one row shorter than `x`.
pub fn roll_apply_min(x: ArrayView2<f64>) -> Array2<f64> {
    reduce_windows(x, 2, window_min)
}

/// Column-wise median of each centered three-row window; two rows shorter than `x`.
pub fn roll_apply_median(x: ArrayView2<f64>) -> Array2<f64> {
    reduce_windows(x, 3, window_median)
}

/// Column-wise product over each window of `m` consecutive rows.
///
/// Output row `i` ends at input row `i + m - 1`, so the result has `m - 1`
/// fewer rows than `x` (or none if `m` exceeds the row count).
///
/// # Errors
/// * [`ShapeError::WindowTooSmall`] if `m == 0`.
pub fn roll_apply_prod(x: ArrayView2<f64>, m: ProductWindow) -> TickGridResult<Array2<f64>> {
    if m.get() == 0 {
        return Err(ShapeError::WindowTooSmall {
            context: "roll_apply_prod",
            window: 0,
            min: 1,
        }
        .into());
    }
    Ok(reduce_windows(x, m.get(), |w| w.product()))
}

/// Labels `end` consecutive ticks with block numbers.
///
/// The first `size` ticks get label `0`; after that every block of `size`
/// ticks gets the next label, starting at `1`. A zero block size labels
/// everything `0`.
///
/// ```
/// use tickgrid::prelude::*;
///
/// assert_eq!(tick_grouping(7, GroupSize(3)).to_vec(), vec![0, 0, 0, 1, 1, 1, 2]);
/// ```
pub fn tick_grouping(end: usize, size: GroupSize) -> Array1<usize> {
    let size = size.get();
    if size == 0 {
        return Array1::zeros(end);
    }
    Array1::from_iter((0..end).map(|i| i / size))
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    #[test]
    fn min_of_two_rows() {
        let x = array![[1.0, 5.0, -2.0], [3.0, 4.0, -7.0]];
        assert_eq!(roll_apply_min(x.view()), array![[1.0, 4.0, -7.0]]);
    }

    #[test]
    fn min_slides_over_adjacent_pairs() {
        let x = array![[3.0], [1.0], [2.0], [5.0]];
        assert_eq!(roll_apply_min(x.view()), array![[1.0], [1.0], [2.0]]);
    }

    #[test]
    fn min_is_poisoned_by_missing() {
        let x = array![[1.0, 2.0], [MISSING, 3.0], [4.0, 5.0]];

        let out = roll_apply_min(x.view());

        assert!(out[[0, 0]].is_nan());
        assert!(out[[1, 0]].is_nan());
        assert_eq!(out.column(1).to_vec(), vec![2.0, 3.0]);
    }

    #[test]
    fn median_of_three_row_windows() {
        let x = array![[1.0, 9.0], [5.0, 2.0], [3.0, 4.0], [0.0, 8.0]];

        let out = roll_apply_median(x.view());

        assert_eq!(out, array![[3.0, 4.0], [3.0, 4.0]]);
    }

    #[test]
    fn median_is_poisoned_by_missing() {
        let x = array![[1.0], [MISSING], [3.0], [4.0]];
        let out = roll_apply_median(x.view());
        assert!(out.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn short_inputs_produce_empty_outputs() {
        let one = array![[1.0, 2.0]];
        assert_eq!(roll_apply_min(one.view()).dim(), (0, 2));
        assert_eq!(roll_apply_median(one.view()).dim(), (0, 2));

        let empty = Array2::<f64>::zeros((0, 2));
        assert_eq!(roll_apply_min(empty.view()).dim(), (0, 2));
    }

    #[test]
    fn product_over_trailing_window() {
        let x = array![[1.0, 2.0], [2.0, 3.0], [3.0, 4.0], [4.0, 5.0]];

        let out = roll_apply_prod(x.view(), ProductWindow(3)).unwrap();

        assert_eq!(out, array![[6.0, 24.0], [24.0, 60.0]]);
    }

    #[test]
    fn product_window_of_one_is_identity() {
        let x = array![[1.5, -2.0], [0.5, 3.0]];
        assert_eq!(roll_apply_prod(x.view(), ProductWindow(1)).unwrap(), x);
    }

    #[test]
    fn product_edge_cases() {
        let x = array![[1.0], [2.0]];
        assert!(roll_apply_prod(x.view(), ProductWindow(0)).is_err());
        assert_eq!(roll_apply_prod(x.view(), ProductWindow(5)).unwrap().dim(), (0, 1));

        let poisoned = array![[1.0], [MISSING], [2.0]];
        let out = roll_apply_prod(poisoned.view(), ProductWindow(2)).unwrap();
        assert!(out.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn tick_grouping_blocks() {
        assert_eq!(tick_grouping(7, GroupSize(3)).to_vec(), vec![0, 0, 0, 1, 1, 1, 2]);
        assert_eq!(tick_grouping(4, GroupSize(1)).to_vec(), vec![0, 1, 2, 3]);
        assert_eq!(tick_grouping(2, GroupSize(5)).to_vec(), vec![0, 0]);
    }

    #[test]
    fn tick_grouping_degenerate_sizes() {
        assert!(tick_grouping(0, GroupSize(3)).is_empty());
        assert_eq!(tick_grouping(3, GroupSize(0)).to_vec(), vec![0, 0, 0]);
    }
}
