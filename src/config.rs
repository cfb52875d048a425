use serde::{Deserialize, Serialize};

use crate::{
    error::{ConfigError, TickGridResult},
    math::{pre_averaging::PreAveragingWindow, returns::ReturnKind},
};

/// Configuration blueprint for a [`Pipeline`](crate::pipeline::Pipeline).
///
/// Describes the usual preparation chain for tick data before it reaches a
/// realized (co)variance estimator:
///
/// 1. **Synchronization:** optional refresh-time sampling of the raw price matrix.
/// 2. **Returns:** simple or log differences of the (synchronized) prices.
/// 3. **Noise reduction:** optional pre-averaging of the returns.
///
/// # Example
///
/// ```
/// # use tickgrid::prelude::*;
/// # fn example() -> TickGridResult<()> {
/// let cfg = PipelineConfig::default()
///     .with_return_kind(ReturnKind::Log)
///     .with_pre_averaging(PreAveragingWindow(4));
///
/// cfg.validate()?;
/// let pipeline = Pipeline::new(cfg)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Apply refresh-time sampling before differencing.
    #[serde(default = "default_synchronize")]
    synchronize: bool,

    /// How prices are differenced into returns.
    #[serde(default)]
    return_kind: ReturnKind,

    /// Pre-averaging window `k_n`; `None` keeps the raw returns.
    #[serde(default)]
    pre_averaging: Option<PreAveragingWindow>,
}

fn default_synchronize() -> bool {
    true
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            synchronize: default_synchronize(),
            return_kind: ReturnKind::default(),
            pre_averaging: None,
        }
    }
}

// ================================================================================================
// Builder Methods
// ================================================================================================

impl PipelineConfig {
    /// Enables or disables refresh-time synchronization.
    pub fn with_synchronization(self, synchronize: bool) -> Self {
        Self {
            synchronize,
            ..self
        }
    }

    /// Sets how prices are differenced.
    pub fn with_return_kind(self, return_kind: ReturnKind) -> Self {
        Self {
            return_kind,
            ..self
        }
    }

    /// Enables pre-averaging with window `kn`.
    pub fn with_pre_averaging(self, kn: PreAveragingWindow) -> Self {
        Self {
            pre_averaging: Some(kn),
            ..self
        }
    }

    /// Disables pre-averaging.
    pub fn without_pre_averaging(self) -> Self {
        Self {
            pre_averaging: None,
            ..self
        }
    }
}

// ================================================================================================
// Accessor Methods
// ================================================================================================

impl PipelineConfig {
    pub fn synchronize(&self) -> bool {
        self.synchronize
    }

    pub fn return_kind(&self) -> ReturnKind {
        self.return_kind
    }

    pub fn pre_averaging(&self) -> Option<PreAveragingWindow> {
        self.pre_averaging
    }
}

// ================================================================================================
// Validation & Identity
// ================================================================================================

impl PipelineConfig {
    /// Checks the parameters that do not depend on the data.
    ///
    /// Whether `k_n` fits the number of observations can only be decided
    /// when the pipeline runs.
    pub fn validate(&self) -> TickGridResult<()> {
        if let Some(kn) = self.pre_averaging.filter(|kn| kn.get() < 2) {
            return Err(ConfigError::Invalid(format!(
                "pre-averaging window must be at least 2, got {kn}"
            ))
            .into());
        }
        Ok(())
    }

    /// Computes a deterministic hash of this configuration.
    ///
    /// Used to tag results produced with the same preparation settings.
    pub fn hash(&self) -> TickGridResult<String> {
        let mut hasher = blake3::Hasher::new();
        let bytes = postcard::to_stdvec(self).map_err(ConfigError::Encoding)?;
        hasher.update(&bytes);
        Ok(format!("{}", hasher.finalize()))
    }

    /// Parses and validates a JSON document.
    ///
    /// Missing fields fall back to their defaults.
    pub fn from_json_str(json: &str) -> TickGridResult<Self> {
        let cfg: Self = serde_json::from_str(json).map_err(ConfigError::Json)?;
        cfg.validate()?;
        Ok(cfg)
    }
}
