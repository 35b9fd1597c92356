//! Month-by-month projection of accumulated debt or surplus

use log::debug;

use super::series::{ProjectionKind, ProjectionResult};
use super::state::ProjectionState;
use crate::config::DEFAULT_MAX_CHECKPOINT_YEAR;
use crate::error::{DiagnosticError, Result};
use crate::loan::{LoanRequest, LoanVerdict};
use crate::profile::FinancialProfile;

/// Projection engine for a fixed set of year checkpoints
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    /// Sorted, deduplicated, all positive
    year_checkpoints: Vec<u32>,
}

impl ProjectionEngine {
    /// Create an engine for the given checkpoints (any order, duplicates allowed)
    pub fn new(year_checkpoints: &[u32]) -> Result<Self> {
        Self::with_max_year(year_checkpoints, DEFAULT_MAX_CHECKPOINT_YEAR)
    }

    /// Same as [`ProjectionEngine::new`] with an explicit latest accepted year
    ///
    /// Zero, anything past `max_year`, and any year whose month count overflows are rejected.
    pub fn with_max_year(year_checkpoints: &[u32], max_year: u32) -> Result<Self> {
        let invalid = year_checkpoints
            .iter()
            .find(|&&y| y == 0 || y > max_year || y.checked_mul(12).is_none());
        if let Some(&year) = invalid {
            return Err(DiagnosticError::InvalidCheckpoint { year });
        }

        let mut year_checkpoints = year_checkpoints.to_vec();
        year_checkpoints.sort_unstable();
        year_checkpoints.dedup();

        Ok(Self { year_checkpoints })
    }

    pub fn year_checkpoints(&self) -> &[u32] {
        &self.year_checkpoints
    }

    /// Months simulated by the debt projection: last checkpoint * 12
    pub fn horizon_months(&self) -> u32 {
        self.year_checkpoints.last().copied().unwrap_or(0) * 12
    }

    /// Debt projection for a non-viable loan, surplus projection otherwise
    pub fn project(&self, profile: &FinancialProfile, loan: &LoanRequest, verdict: &LoanVerdict) -> ProjectionResult {
        if verdict.is_viable {
            self.project_surplus(loan, verdict)
        } else {
            self.project_debt(profile, loan, verdict)
        }
    }

    /// Two-phase compounding debt projection
    ///
    /// While the loan runs, the monthly shortfall is added. After the term only the
    /// structural deficit (independent of the loan) is added. Either way the whole
    /// accumulated balance then compounds at the loan's monthly rate. Arrears are never
    /// repaid, so the debt does not shrink.
    pub fn project_debt(&self, profile: &FinancialProfile, loan: &LoanRequest, verdict: &LoanVerdict) -> ProjectionResult {
        if verdict.is_viable {
            debug!("debt projection requested for a viable loan; balance will stay at zero");
        }

        let mut result = ProjectionResult::new(ProjectionKind::Debt);
        let mut state = ProjectionState::new();

        let term = loan.term_months.max(0) as u32;
        let monthly_rate = loan.monthly_rate();
        let shortfall = verdict.shortfall;
        let structural_deficit = profile.structural_deficit();

        for _month in 1..=self.horizon_months() {
            state.advance_month();

            let addition = if state.month <= term {
                shortfall
            } else {
                structural_deficit
            };
            state.accrue(addition, monthly_rate);

            let balance = state.balance();
            result.add_month(state.month, balance);

            if state.is_year_end() && self.year_checkpoints.binary_search(&state.year()).is_ok() {
                result.add_checkpoint(state.year(), balance);
            }
        }

        debug!(
            "debt projection: {} months, shortfall={:.2} structural={:.2} final={:.2}",
            state.month,
            shortfall,
            structural_deficit,
            state.balance()
        );

        result
    }

    /// Linear surplus over the loan term, no compounding
    ///
    /// `surplus(month) = post_loan_cash_flow * month` for months `0..=term_months`.
    /// Checkpoints are reported for the years that fall inside the term.
    pub fn project_surplus(&self, loan: &LoanRequest, verdict: &LoanVerdict) -> ProjectionResult {
        let mut result = ProjectionResult::new(ProjectionKind::Surplus);
        let term = loan.term_months.max(0) as u32;
        let monthly = verdict.post_loan_cash_flow;

        for month in 1..=term {
            result.add_month(month, monthly * month as f64);
        }

        for &year in &self.year_checkpoints {
            let month = year * 12;
            if month > term {
                break;
            }
            result.add_checkpoint(year, monthly * month as f64);
        }

        result
    }
}
