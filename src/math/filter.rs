use ndarray::{Array1, ArrayView1};

use crate::math::missing::MISSING;

/// Applies a finite impulse response filter to a single series.
///
/// With `nf = filter.len()` and `nshift = nf / 2`, output `i` is
///
/// ```text
/// y[i] = sum_{j=0}^{nf-1} filter[j] * x[i + nshift - j]
/// ```
///
/// so tap `0` pairs with the latest input of the window. Positions whose
/// window `[i + nshift - (nf - 1), i + nshift]` leaves `[0, nx)` are set to
/// the missing marker; there is no padding at the edges. A missing input
/// inside a window makes that output missing. An empty filter yields zeros.
///
/// Direct convolution, `O(nx * nf)`.
///
/// ```
/// use ndarray::array;
/// use tickgrid::prelude::*;
///
/// let x = array![1.0, 2.0, 3.0, 4.0];
/// let y = linear_filter(x.view(), array![0.5, 0.5].view());
///
/// assert_eq!(y.slice(ndarray::s![..3]).to_vec(), vec![1.5, 2.5, 3.5]);
/// assert!(y[3].is_nan());
/// ```
pub fn linear_filter(x: ArrayView1<f64>, filter: ArrayView1<f64>) -> Array1<f64> {
    let nx = x.len() as isize;
    let nf = filter.len() as isize;
    let nshift = nf / 2;

    (0..nx)
        .map(|i| {
            let newest = i + nshift;
            let oldest = newest - (nf - 1);
            if oldest < 0 || newest >= nx {
                return MISSING;
            }
            filter
                .iter()
                .enumerate()
                .map(|(j, tap)| tap * x[(newest - j as isize) as usize])
                .sum()
        })
        .collect()
}
