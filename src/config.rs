//! Engine configuration

use serde::{Deserialize, Serialize};

/// Longest accepted loan term (100 years). Keeps `(1 + r)^N` well inside f64 range.
pub const DEFAULT_MAX_TERM_MONTHS: i32 = 1200;

/// Latest year checkpoint accepted by the projection (same horizon as the longest term)
pub const DEFAULT_MAX_CHECKPOINT_YEAR: u32 = (DEFAULT_MAX_TERM_MONTHS / 12) as u32;

/// Year checkpoints reported by the debt projection
pub const DEFAULT_YEAR_CHECKPOINTS: [u32; 6] = [1, 2, 3, 5, 10, 20];

/// Configuration shared by the loan and projection engines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Upper bound on `term_months` accepted by the payment calculation
    pub max_term_months: i32,

    /// Years at which projection checkpoints are emitted
    pub year_checkpoints: Vec<u32>,

    /// Upper bound on any year checkpoint; caps the projection horizon
    pub max_checkpoint_year: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_term_months: DEFAULT_MAX_TERM_MONTHS,
            year_checkpoints: DEFAULT_YEAR_CHECKPOINTS.to_vec(),
            max_checkpoint_year: DEFAULT_MAX_CHECKPOINT_YEAR,
        }
    }
}
