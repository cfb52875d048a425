pub mod filter;
pub mod grid;
pub mod linalg;
pub mod missing;
pub mod pre_averaging;
pub mod refresh_time;
pub mod returns;
pub mod rolling;
