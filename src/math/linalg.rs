use nalgebra::{DMatrix, DVector};
use ndarray::{Array1, ArrayView1, ArrayView2};
use tracing::warn;

use crate::{
    error::{ShapeError, SolveError, TickGridResult},
    math::missing::{MISSING, MissingExt},
};

const SVD_MAX_ITERATIONS: usize = 1_000;

/// Solves `A x = b` the way a left matrix division does.
///
/// A square, non-singular `A` is solved exactly through an LU decomposition.
/// A singular square system, or a non-square one, gets the minimum-norm
/// least-squares solution computed from the SVD. Missing entries in `A` or
/// `b` yield a solution made of missing markers.
///
/// # Errors
/// * [`ShapeError::DimensionMismatch`] if `b.len() != a.nrows()`.
/// * [`ShapeError::Empty`] if `A` has no entries.
/// * [`SolveError::Decomposition`] if the SVD does not converge.
#[tracing::instrument(skip_all, fields(rows = a.nrows(), cols = a.ncols()))]
pub fn mldivide(a: ArrayView2<f64>, b: ArrayView1<f64>) -> TickGridResult<Array1<f64>> {
    if a.nrows() != b.len() {
        return Err(ShapeError::DimensionMismatch {
            context: "mldivide right-hand side",
            expected: a.nrows(),
            actual: b.len(),
        }
        .into());
    }
    if a.is_empty() {
        return Err(ShapeError::Empty("mldivide requires a non-empty system").into());
    }
    if a.iter().any(|v| v.is_missing()) || b.is_missing() {
        return Ok(Array1::from_elem(a.ncols(), MISSING));
    }

    let lhs = DMatrix::from_fn(a.nrows(), a.ncols(), |i, j| a[[i, j]]);
    let rhs = DVector::from_iterator(b.len(), b.iter().copied());

    let solution = if lhs.is_square() {
        match lhs.clone().lu().solve(&rhs) {
            Some(x) if x.iter().all(|v| v.is_finite()) => x,
            _ => {
                warn!("System seems singular; attempting approximate solution");
                least_squares(lhs, &rhs)?
            }
        }
    } else {
        least_squares(lhs, &rhs)?
    };

    Ok(solution.iter().copied().collect())
}

/// Minimum-norm least-squares solution via the pseudo-inverse.
fn least_squares(lhs: DMatrix<f64>, rhs: &DVector<f64>) -> TickGridResult<DVector<f64>> {
    let max_dim = lhs.nrows().max(lhs.ncols()) as f64;
    let svd = lhs
        .try_svd(true, true, f64::EPSILON, SVD_MAX_ITERATIONS)
        .ok_or_else(|| SolveError::Decomposition("SVD did not converge".to_string()))?;

    // Singular values below this are treated as zero.
    let tolerance = max_dim * svd.singular_values.max() * f64::EPSILON;
    svd.solve(rhs, tolerance)
        .map_err(|e| SolveError::Decomposition(e.to_string()).into())
}
