//! Error types for the diagnostic engine

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DiagnosticError {
    #[error("invalid input: {field} must be a non-negative amount, got {value}")]
    InvalidInput {
        field: &'static str,
        value: f64,
    },

    #[error("invalid term: {term_months} months (term must be positive)")]
    InvalidTerm {
        term_months: i32,
    },

    #[error("term too long: {term_months} months exceeds limit of {max}")]
    TermTooLong {
        term_months: i32,
        max: i32,
    },

    #[error("invalid projection checkpoint: year {year}")]
    InvalidCheckpoint {
        year: u32,
    },
}

pub type Result<T> = std::result::Result<T, DiagnosticError>;

/// Reject negative and non-finite amounts
pub(crate) fn ensure_amount(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(DiagnosticError::InvalidInput { field, value })
    }
}
