#![allow(dead_code)]

use std::sync::Once;

use ndarray::{Array1, Array2};
use tickgrid::prelude::MISSING;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Installs a test subscriber once; honours `RUST_LOG`.
pub fn init_tracing() {
    INIT.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_test_writer()
            .try_init();
    });
}

/// Three instruments quoting at staggered times.
///
/// Each instrument ticks every `periods[d]` rows, starting at row `d`, with a
/// deterministic random walk around `100 * (d + 1)`.
pub fn staggered_quotes(rows: usize) -> (Array2<f64>, Array1<f64>) {
    let periods = [1usize, 2, 3];
    let prices = Array2::from_shape_fn((rows, periods.len()), |(i, d)| {
        if i < d || (i - d) % periods[d] != 0 {
            return MISSING;
        }
        let base = 100.0 * (d as f64 + 1.0);
        let drift = ((i * 7 + d * 13) % 11) as f64 / 10.0 - 0.5;
        base + drift
    });
    let idx = Array1::from_iter((0..rows).map(|i| 1_000.0 + i as f64 * 0.25));
    (prices, idx)
}
