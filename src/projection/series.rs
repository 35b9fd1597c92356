//! Projection output structures

use serde::{Deserialize, Serialize};

/// Balance at a year checkpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtProjectionPoint {
    /// Display label, e.g. "3 año(s)"
    pub period_label: String,
    pub year: u32,
    /// Negative is accumulated debt, positive is accumulated surplus
    pub cumulative_balance: f64,
}

impl DebtProjectionPoint {
    pub fn new(year: u32, cumulative_balance: f64) -> Self {
        Self {
            period_label: format!("{} año(s)", year),
            year,
            cumulative_balance,
        }
    }
}

/// One entry of the month-indexed series used for charting
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BalancePoint {
    pub month: u32,
    pub balance: f64,
}

/// Which model produced the projection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionKind {
    /// Compounding unpaid shortfall (loan not viable)
    Debt,
    /// Linear banked surplus (loan viable)
    Surplus,
}

/// Complete projection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    pub kind: ProjectionKind,

    /// Year checkpoints, ascending
    pub checkpoints: Vec<DebtProjectionPoint>,

    /// Month 0 onwards
    pub series: Vec<BalancePoint>,
}

impl ProjectionResult {
    pub fn new(kind: ProjectionKind) -> Self {
        Self {
            kind,
            checkpoints: Vec::new(),
            series: vec![BalancePoint { month: 0, balance: 0.0 }],
        }
    }

    pub fn add_month(&mut self, month: u32, balance: f64) {
        self.series.push(BalancePoint { month, balance });
    }

    pub fn add_checkpoint(&mut self, year: u32, balance: f64) {
        self.checkpoints.push(DebtProjectionPoint::new(year, balance));
    }

    /// Balance at a given month, if it was projected
    pub fn balance_at(&self, month: u32) -> Option<f64> {
        self.series.get(month as usize).map(|p| p.balance)
    }

    pub fn summary(&self) -> ProjectionSummary {
        let final_balance = self.series.last().map(|p| p.balance).unwrap_or(0.0);
        let peak_debt = self
            .series
            .iter()
            .map(|p| (-p.balance).max(0.0))
            .fold(0.0, f64::max);

        ProjectionSummary {
            kind: self.kind,
            horizon_months: self.series.last().map(|p| p.month).unwrap_or(0),
            final_balance,
            peak_debt,
        }
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub kind: ProjectionKind,
    pub horizon_months: u32,
    pub final_balance: f64,
    pub peak_debt: f64,
}
