use thiserror::Error;

pub type TickGridResult<T> = Result<T, TickGridError>;

#[derive(Debug, Error)]
pub enum TickGridError {
    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error(transparent)]
    Solve(#[from] SolveError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors raised when the dimensions of the inputs do not fit together.
///
/// These replace what would otherwise be out-of-bounds indexing. Missing
/// observations are never reported here; they travel as `NaN`.
#[derive(Debug, Error, PartialEq)]
pub enum ShapeError {
    #[error("Dimension mismatch in {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Window of {window} exceeds the available {available} observations in {context}")]
    WindowTooLarge {
        context: &'static str,
        window: usize,
        available: usize,
    },

    #[error("Window of {window} is below the minimum of {min} in {context}")]
    WindowTooSmall {
        context: &'static str,
        window: usize,
        min: usize,
    },

    #[error("Empty input: {0}")]
    Empty(&'static str),

    #[error("Invalid step size {step} in {context}: must be finite and positive")]
    InvalidStep { context: &'static str, step: f64 },

    #[error("Span {span} in {context} does not give a representable sequence length")]
    InvalidSpan { context: &'static str, span: f64 },
}

/// Errors from solving linear systems.
#[derive(Debug, Error)]
pub enum SolveError {
    #[error("Decomposition failed: {0}")]
    Decomposition(String),
}

/// Errors related to pipeline configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid pipeline configuration: {0}")]
    Invalid(String),

    #[error("Failed to encode PipelineConfig")]
    Encoding(#[from] postcard::Error),

    #[error("Failed to parse PipelineConfig")]
    Json(#[from] serde_json::Error),
}
