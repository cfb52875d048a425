use itertools::iproduct;
use ndarray::{Array1, ArrayView1};

use crate::error::{ShapeError, TickGridResult};

/// `true` iff the closed intervals `[min1, max1]` and `[min2, max2]` share a
/// stretch of strictly positive length. Touching intervals do not overlap,
/// and neither does an interval with a missing bound.
pub fn overlap(min1: f64, max1: f64, min2: f64, max2: f64) -> bool {
    if [min1, max1, min2, max2].iter().any(|v| v.is_nan()) {
        return false;
    }
    max1.min(max2) - min1.max(min2) > 0.0
}

/// Leftmost position `i` with `x[i] >= thresh` (a linear bisect-left).
///
/// Returns `x.len()` when no element qualifies, which callers must read as
/// "not found".
pub fn find_first(x: ArrayView1<f64>, thresh: f64) -> usize {
    x.iter().position(|&v| v >= thresh).unwrap_or(x.len())
}

/// Builds one arithmetic sequence per start/end pair and stacks them
/// column-major into a flat vector.
///
/// All columns share the row count of column `0`,
/// `floor((ends[0] - starts[0]) / scale_factor) + 1`; column `j` runs
/// `starts[j], starts[j] + scale_factor, ...` for that many rows. The
/// remaining pairs are expected to span the same distance.
///
/// ```
/// use ndarray::array;
/// use tickgrid::prelude::*;
///
/// let out = m_seq(array![0.0, 10.0].view(), array![2.0, 12.0].view(), 1.0).unwrap();
/// assert_eq!(out.to_vec(), vec![0.0, 1.0, 2.0, 10.0, 11.0, 12.0]);
/// ```
///
/// # Errors
/// * [`ShapeError::DimensionMismatch`] if `starts` and `ends` differ in length.
/// * [`ShapeError::InvalidStep`] if `scale_factor` is not finite and positive.
/// * [`ShapeError::InvalidSpan`] if the first span is infinite or yields more
///   rows than fit in memory.
pub fn m_seq(
    starts: ArrayView1<f64>,
    ends: ArrayView1<f64>,
    scale_factor: f64,
) -> TickGridResult<Array1<f64>> {
    if starts.len() != ends.len() {
        return Err(ShapeError::DimensionMismatch {
            context: "m_seq",
            expected: starts.len(),
            actual: ends.len(),
        }
        .into());
    }
    if !(scale_factor.is_finite() && scale_factor > 0.0) {
        return Err(ShapeError::InvalidStep {
            context: "m_seq",
            step: scale_factor,
        }
        .into());
    }
    if starts.is_empty() {
        return Ok(Array1::zeros(0));
    }

    let span = ends[0] - starts[0];
    if span.is_nan() || span < 0.0 {
        return Ok(Array1::zeros(0));
    }
    let steps = (span / scale_factor).floor();
    let n_rows = Some(steps)
        .filter(|s| s.is_finite() && *s < usize::MAX as f64)
        .and_then(|s| (s as usize).checked_add(1))
        .filter(|rows| {
            rows.checked_mul(starts.len())
                .and_then(|len| len.checked_mul(std::mem::size_of::<f64>()))
                .is_some_and(|bytes| bytes <= isize::MAX as usize)
        })
        .ok_or(ShapeError::InvalidSpan {
            context: "m_seq",
            span,
        })?;

    Ok(iproduct!(starts.iter(), 0..n_rows)
        .map(|(start, k)| start + k as f64 * scale_factor)
        .collect())
}
