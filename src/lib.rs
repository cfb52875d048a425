//! Preprocessing for asynchronously sampled multivariate tick data.
//!
//! Raw quotes for `D` instruments arrive at irregular, overlapping times.
//! This crate turns such `N x D` observation matrices (missing entries are
//! `NaN`) into structures realized (co)variance estimators can consume:
//! refresh-time synchronized grids, pre-averaged returns, filtered series,
//! rolling reductions and estimation grids.
//!
//! Every operation is a synchronous, pure function over `ndarray` inputs.

mod macros;

pub mod config;
pub mod error;
pub mod math;
pub mod pipeline;
pub mod prelude;
