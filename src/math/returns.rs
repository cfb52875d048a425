use ndarray::{Array2, ArrayView2, Axis, s};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// How prices are turned into returns.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    EnumIter,
    IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReturnKind {
    /// `p[t] - p[t-1]`
    Simple,
    /// `ln p[t] - ln p[t-1]`
    #[default]
    Log,
}

impl ReturnKind {
    /// Differences an `N x D` price matrix into `(N-1) x D` returns.
    pub fn apply(&self, prices: ArrayView2<f64>) -> Array2<f64> {
        match self {
            ReturnKind::Simple => simple_returns(prices),
            ReturnKind::Log => log_returns(prices),
        }
    }
}

/// Per-column cumulative sum: `y[i, j] = x[0, j] + ... + x[i, j]`.
///
/// A missing value makes the rest of its column missing.
pub fn col_cumsum(x: ArrayView2<f64>) -> Array2<f64> {
    let mut y = x.to_owned();
    y.accumulate_axis_inplace(Axis(0), |&prev, curr| *curr += prev);
    y
}

/// First differences of each column.
pub fn simple_returns(prices: ArrayView2<f64>) -> Array2<f64> {
    if prices.nrows() < 2 {
        return Array2::zeros((0, prices.ncols()));
    }
    &prices.slice(s![1.., ..]) - &prices.slice(s![..-1, ..])
}

/// First differences of the natural log of each column.
pub fn log_returns(prices: ArrayView2<f64>) -> Array2<f64> {
    simple_returns(prices.mapv(f64::ln).view())
}
