//! Financial profile data structures

use serde::{Deserialize, Serialize};

/// Monthly income and expense figures for one person
///
/// Built through [`CashFlowAnalyzer::analyze`](super::CashFlowAnalyzer::analyze),
/// which validates every amount. Derived figures are computed on demand, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinancialProfile {
    /// Net monthly income (after taxes)
    pub monthly_income: f64,

    /// Rent, utilities, tuition and other expenses that do not change month to month
    pub fixed_expenses: f64,

    /// Average spending on food, transport, entertainment, etc.
    pub variable_expenses: f64,
}

impl FinancialProfile {
    pub fn total_expenses(&self) -> f64 {
        self.fixed_expenses + self.variable_expenses
    }

    /// Money left each month after fixed and variable expenses, before any loan
    pub fn free_cash_flow(&self) -> f64 {
        self.monthly_income - self.total_expenses()
    }

    /// Monthly deficit that exists independently of any loan (0 when living within means)
    pub fn structural_deficit(&self) -> f64 {
        (-self.free_cash_flow()).max(0.0)
    }

    pub fn verdict(&self) -> LifestyleVerdict {
        let free = self.free_cash_flow();
        if free >= 0.0 {
            LifestyleVerdict::WithinMeans { surplus: free }
        } else {
            LifestyleVerdict::StructuralDeficit { deficit: free.abs() }
        }
    }
}

/// Lifestyle verdict for a profile before any loan is considered
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LifestyleVerdict {
    /// Income covers expenses (break-even included)
    WithinMeans { surplus: f64 },
    /// Expenses exceed income every month
    StructuralDeficit { deficit: f64 },
}

impl LifestyleVerdict {
    pub fn is_within_means(&self) -> bool {
        matches!(self, LifestyleVerdict::WithinMeans { .. })
    }
}
