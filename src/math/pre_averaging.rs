use ndarray::{Array1, Array2, ArrayView1, ArrayView2, s};
use serde::{Deserialize, Serialize};

use crate::{
    error::{ShapeError, TickGridResult},
    impl_window_newtype,
};

/// Pre-averaging window `k_n`, measured in prices (the kernel spans `k_n - 1` returns).
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PreAveragingWindow(pub usize);

impl_window_newtype!(PreAveragingWindow);

/// Tent-shaped pre-averaging kernel of length `kn - 1`.
///
/// Starts from the ramp `j / kn` for `j = 1..kn-1` and replaces every weight
/// that is strictly greater than its complement by `1 - w`.
///
/// ```
/// use tickgrid::prelude::*;
///
/// let w = pre_averaging_weights(PreAveragingWindow(4));
/// assert_eq!(w.to_vec(), vec![0.25, 0.5, 0.25]);
/// ```
pub fn pre_averaging_weights(kn: PreAveragingWindow) -> Array1<f64> {
    let kn = kn.get();
    let mut weights = Array1::from_iter((1..kn).map(|j| j as f64 / kn as f64));
    weights.mapv_inplace(|w| if w > 1.0 - w { 1.0 - w } else { w });
    weights
}

/// Dot product of a weight kernel with an equally long slice of one series.
pub fn weighted_sum(weights: ArrayView1<f64>, series: ArrayView1<f64>) -> TickGridResult<f64> {
    if weights.len() != series.len() {
        return Err(ShapeError::DimensionMismatch {
            context: "weighted_sum",
            expected: weights.len(),
            actual: series.len(),
        }
        .into());
    }
    Ok(weights.dot(&series))
}

/// Pre-averages an `(N-1) x D` return matrix with window `kn`.
///
/// Output row `i` is the tent-weighted sum of return rows `i ..= i + kn - 2`,
/// the same weight applied across all columns of a row. The result has
/// `N - kn + 1` rows. Missing returns inside a window make that output
/// entry missing.
///
/// # Errors
/// * [`ShapeError::WindowTooSmall`] if `kn < 2`.
/// * [`ShapeError::WindowTooLarge`] if `kn > N`.
#[tracing::instrument(skip_all, fields(rows = ret.nrows(), cols = ret.ncols(), kn = %kn))]
pub fn pre_averaging_returns(
    ret: ArrayView2<f64>,
    kn: PreAveragingWindow,
) -> TickGridResult<Array2<f64>> {
    let window = kn.get();
    let n_prices = ret.nrows() + 1;
    if window < 2 {
        return Err(ShapeError::WindowTooSmall {
            context: "pre_averaging_returns",
            window,
            min: 2,
        }
        .into());
    }
    if window > n_prices {
        return Err(ShapeError::WindowTooLarge {
            context: "pre_averaging_returns",
            window,
            available: n_prices,
        }
        .into());
    }

    let weights = pre_averaging_weights(kn);
    let n_out = n_prices - window + 1;
    let mut out = Array2::zeros((n_out, ret.ncols()));

    for (i, mut out_row) in out.outer_iter_mut().enumerate() {
        let block = ret.slice(s![i..i + window - 1, ..]);
        for (dst, column) in out_row.iter_mut().zip(block.columns()) {
            *dst = weighted_sum(weights.view(), column)?;
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;
    use crate::{error::TickGridError, math::missing::MISSING};

    fn assert_symmetric(w: &Array1<f64>) {
        let n = w.len();
        for j in 0..n {
            assert!(
                (w[j] - w[n - 1 - j]).abs() < 1e-12,
                "weights not symmetric: {w:?}"
            );
        }
    }

    #[test]
    fn kn_four_folds_to_tent() {
        let w = pre_averaging_weights(PreAveragingWindow(4));
        assert_eq!(w, array![0.25, 0.5, 0.25]);
    }

    #[test]
    fn weights_are_symmetric_for_odd_and_even_windows() {
        for kn in 2..40 {
            let w = pre_averaging_weights(PreAveragingWindow(kn));
            assert_eq!(w.len(), kn - 1);
            assert_symmetric(&w);
            assert!(w.iter().all(|&v| v > 0.0 && v <= 0.5));
        }
    }

    #[test]
    fn kn_five_has_no_exact_half() {
        let w = pre_averaging_weights(PreAveragingWindow(5));
        let expected = [0.2, 0.4, 0.4, 0.2];
        for (a, b) in w.iter().zip(expected) {
            assert!((a - b).abs() < 1e-12, "{w:?}");
        }
    }

    #[test]
    fn windowed_weighted_sum_per_column() {
        // N = 5 prices, kn = 3 -> 3 output rows, kernel [1/3, 1/3].
        let ret = array![[1.0, 10.0], [2.0, 20.0], [3.0, 30.0], [4.0, 40.0]];

        let out = pre_averaging_returns(ret.view(), PreAveragingWindow(3)).unwrap();

        assert_eq!(out.dim(), (3, 2));
        let expected = array![[1.0, 10.0], [5.0 / 3.0, 50.0 / 3.0], [7.0 / 3.0, 70.0 / 3.0]];
        for (a, b) in out.iter().zip(expected.iter()) {
            assert!((a - b).abs() < 1e-12, "{out:?}");
        }
    }

    #[test]
    fn window_equal_to_price_count_gives_one_row() {
        let ret = array![[1.0], [1.0], [1.0]];

        let out = pre_averaging_returns(ret.view(), PreAveragingWindow(4)).unwrap();

        assert_eq!(out.dim(), (1, 1));
        assert!((out[[0, 0]] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn missing_return_poisons_covering_windows_only() {
        let ret = array![[MISSING], [1.0], [1.0], [1.0]];

        let out = pre_averaging_returns(ret.view(), PreAveragingWindow(2)).unwrap();

        assert!(out[[0, 0]].is_nan());
        assert!(out[[1, 0]].is_finite());
    }

    #[test]
    fn oversized_window_is_rejected() {
        let ret = array![[1.0], [2.0]];

        let err = pre_averaging_returns(ret.view(), PreAveragingWindow(4)).unwrap_err();

        assert!(matches!(
            err,
            TickGridError::Shape(ShapeError::WindowTooLarge {
                window: 4,
                available: 3,
                ..
            })
        ));
    }

    #[test]
    fn degenerate_window_is_rejected() {
        let ret = array![[1.0], [2.0]];
        assert!(pre_averaging_returns(ret.view(), PreAveragingWindow(1)).is_err());
    }

    #[test]
    fn weighted_sum_checks_lengths() {
        let w = array![0.5, 0.5];
        assert_eq!(weighted_sum(w.view(), array![2.0, 4.0].view()).unwrap(), 3.0);
        assert!(weighted_sum(w.view(), array![1.0].view()).is_err());
    }
}
