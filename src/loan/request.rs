//! Loan request data

use serde::{Deserialize, Serialize};

/// A proposed loan to evaluate against a profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanRequest {
    /// Amount borrowed
    pub principal: f64,

    /// Repayment term in months. Signed so that bad input reaches validation
    pub term_months: i32,

    /// Annual interest rate as a percentage (35.0 = 35% per year)
    pub annual_rate_percent: f64,
}

impl LoanRequest {
    pub fn new(principal: f64, term_months: i32, annual_rate_percent: f64) -> Self {
        Self {
            principal,
            term_months,
            annual_rate_percent,
        }
    }

    /// Monthly rate as a decimal: annual % / 100 / 12
    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate_percent / 100.0 / 12.0
    }
}
