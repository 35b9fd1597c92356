//! Loan viability verdict

use serde::{Deserialize, Serialize};

/// Outcome of evaluating a loan against a profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanVerdict {
    pub monthly_payment: f64,

    /// Free cash flow minus the loan payment
    pub post_loan_cash_flow: f64,

    /// `post_loan_cash_flow >= 0` (break-even counts as viable)
    pub is_viable: bool,

    /// Monthly gap the payment leaves uncovered: `max(0, -post_loan_cash_flow)`
    pub shortfall: f64,

    /// Sum of all payments over the term
    pub total_repaid: f64,

    /// `total_repaid - principal`
    pub total_interest: f64,

    /// Risk raised independently of the verdict itself
    pub warning: Option<PreconditionWarning>,
}

impl LoanVerdict {
    /// Assemble a verdict from free cash flow and a computed payment
    pub fn from_payment(
        free_cash_flow: f64,
        monthly_payment: f64,
        principal: f64,
        term_months: i32,
    ) -> Self {
        let post_loan_cash_flow = free_cash_flow - monthly_payment;
        let total_repaid = super::payment::total_repaid(monthly_payment, term_months);

        Self {
            monthly_payment,
            post_loan_cash_flow,
            is_viable: post_loan_cash_flow >= 0.0,
            shortfall: (-post_loan_cash_flow).max(0.0),
            total_repaid,
            total_interest: total_repaid - principal,
            warning: PreconditionWarning::check(free_cash_flow),
        }
    }

    /// Change in monthly free cash flow caused by the loan
    pub fn cash_flow_delta(&self) -> f64 {
        -self.monthly_payment
    }
}

/// Warning raised before the loan is even considered
///
/// A new obligation stacked on an existing deficit is a different risk category from a
/// deficit created by the loan, so it is reported separately from `is_viable`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PreconditionWarning {
    /// Expenses already exceed income by `deficit` every month
    ExistingStructuralDeficit { deficit: f64 },
}

impl PreconditionWarning {
    pub fn check(free_cash_flow: f64) -> Option<Self> {
        if free_cash_flow < 0.0 {
            Some(PreconditionWarning::ExistingStructuralDeficit {
                deficit: free_cash_flow.abs(),
            })
        } else {
            None
        }
    }
}

impl std::fmt::Display for PreconditionWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PreconditionWarning::ExistingStructuralDeficit { deficit } => write!(
                f,
                "expenses already exceed income by {:.2} per month before the loan",
                deficit
            ),
        }
    }
}
