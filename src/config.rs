use crate::error::{HweError, Result};

pub const DEFAULT_SAMPLE_SIZE: u32 = 108;
pub const DEFAULT_ALPHA: f64 = 0.05;

/// Parameters shared by every record in one engine invocation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Number of individuals genotyped (N)
    pub sample_size: u32,
    /// Significance threshold for the deviation flag
    pub alpha: f64,
}

impl EngineConfig {
    pub fn new(sample_size: u32, alpha: f64) -> Result<Self> {
        if sample_size == 0 {
            return Err(HweError::InvalidConfig(
                "sample size must be greater than zero".to_string(),
            ));
        }
        if !(alpha > 0.0 && alpha < 1.0) {
            return Err(HweError::InvalidConfig(format!(
                "alpha must lie strictly between 0 and 1, got {}",
                alpha
            )));
        }
        Ok(Self { sample_size, alpha })
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_size: DEFAULT_SAMPLE_SIZE,
            alpha: DEFAULT_ALPHA,
        }
    }
}
