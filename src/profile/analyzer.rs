//! Cash-flow analysis: raw monthly figures to a validated profile

use log::debug;

use super::data::FinancialProfile;
use crate::error::{ensure_amount, Result};

/// Reduces income and expense inputs to a [`FinancialProfile`]
pub struct CashFlowAnalyzer;

impl CashFlowAnalyzer {
    /// Validate the inputs and build a profile
    ///
    /// Fails with [`DiagnosticError::InvalidInput`](crate::DiagnosticError::InvalidInput)
    /// if any amount is negative or not finite. No rounding is applied.
    pub fn analyze(income: f64, fixed_expenses: f64, variable_expenses: f64) -> Result<FinancialProfile> {
        let profile = FinancialProfile {
            monthly_income: ensure_amount("monthly_income", income)?,
            fixed_expenses: ensure_amount("fixed_expenses", fixed_expenses)?,
            variable_expenses: ensure_amount("variable_expenses", variable_expenses)?,
        };

        debug!(
            "profile: income={:.2} expenses={:.2} free_cash_flow={:.2}",
            profile.monthly_income,
            profile.total_expenses(),
            profile.free_cash_flow()
        );

        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DiagnosticError;
    use crate::profile::LifestyleVerdict;

    #[test]
    fn test_analyze_reference_scenario() {
        let profile = CashFlowAnalyzer::analyze(10_000.0, 4_000.0, 3_000.0).unwrap();
        assert_eq!(profile.free_cash_flow(), 3_000.0);
        assert!(profile.verdict().is_within_means());
    }

    #[test]
    fn test_free_cash_flow_is_exact() {
        for &(income, fixed, variable) in &[
            (0.0, 0.0, 0.0),
            (12_345.67, 2_000.01, 999.99),
            (1_000.0, 800.0, 450.5),
            (25_000.0, 0.0, 24_999.99),
        ] {
            let profile = CashFlowAnalyzer::analyze(income, fixed, variable).unwrap();
            assert_eq!(profile.free_cash_flow(), income - (fixed + variable));
        }
    }

    #[test]
    fn test_deficit_profile() {
        let profile = CashFlowAnalyzer::analyze(8_000.0, 6_000.0, 3_500.0).unwrap();
        assert_eq!(
            profile.verdict(),
            LifestyleVerdict::StructuralDeficit { deficit: 1_500.0 }
        );
    }

    #[test]
    fn test_negative_inputs_rejected() {
        let err = CashFlowAnalyzer::analyze(-1.0, 0.0, 0.0).unwrap_err();
        assert!(matches!(err, DiagnosticError::InvalidInput { field: "monthly_income", .. }));

        let err = CashFlowAnalyzer::analyze(1_000.0, -5.0, 0.0).unwrap_err();
        assert!(matches!(err, DiagnosticError::InvalidInput { field: "fixed_expenses", .. }));

        let err = CashFlowAnalyzer::analyze(1_000.0, 5.0, -0.01).unwrap_err();
        assert!(matches!(err, DiagnosticError::InvalidInput { field: "variable_expenses", .. }));
    }

    #[test]
    fn test_analyze_is_idempotent() {
        let a = CashFlowAnalyzer::analyze(9_876.54, 3_210.98, 1_234.56).unwrap();
        let b = CashFlowAnalyzer::analyze(9_876.54, 3_210.98, 1_234.56).unwrap();
        assert_eq!(a.free_cash_flow().to_bits(), b.free_cash_flow().to_bits());
        assert_eq!(a, b);
    }
}
