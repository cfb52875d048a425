// 1. Traits
pub use crate::math::missing::MissingExt;

// 2. Synchronization & Noise Reduction
pub use crate::math::pre_averaging::{
    PreAveragingWindow, pre_averaging_returns, pre_averaging_weights, weighted_sum,
};
pub use crate::math::refresh_time::{RefreshTimeMatch, refresh_time_matching};

// 3. Filters, Rolling Reductions & Grids
pub use crate::math::filter::linear_filter;
pub use crate::math::grid::{find_first, m_seq, overlap};
pub use crate::math::linalg::mldivide;
pub use crate::math::missing::MISSING;
pub use crate::math::returns::{ReturnKind, col_cumsum, log_returns, simple_returns};
pub use crate::math::rolling::{
    GroupSize, ProductWindow, roll_apply_median, roll_apply_min, roll_apply_prod, tick_grouping,
};

// 4. Errors
pub use crate::error::{ConfigError, ShapeError, SolveError, TickGridError, TickGridResult};

// 5. Pipeline & Configuration
pub use crate::config::PipelineConfig;
pub use crate::pipeline::{Pipeline, PipelineOutput};
