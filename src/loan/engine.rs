//! Loan viability engine: payment, verdict and projection

use log::{debug, warn};

use super::payment::monthly_payment;
use super::request::LoanRequest;
use super::verdict::LoanVerdict;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::profile::FinancialProfile;
use crate::projection::{ProjectionEngine, ProjectionResult};

/// Evaluates a loan against a financial profile
#[derive(Debug, Clone, Default)]
pub struct LoanViabilityEngine {
    config: EngineConfig,
}

impl LoanViabilityEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn projection_engine(&self, year_checkpoints: &[u32]) -> Result<ProjectionEngine> {
        ProjectionEngine::with_max_year(year_checkpoints, self.config.max_checkpoint_year)
    }

    /// Fixed monthly payment, see [`monthly_payment`]
    pub fn compute_monthly_payment(&self, principal: f64, term_months: i32, annual_rate_percent: f64) -> Result<f64> {
        monthly_payment(principal, term_months, annual_rate_percent, self.config.max_term_months)
    }

    /// Payment, post-loan cash flow and viability for `loan`
    ///
    /// A profile already in deficit produces a warning on the verdict, not an error.
    pub fn evaluate(&self, profile: &FinancialProfile, loan: &LoanRequest) -> Result<LoanVerdict> {
        let payment = self.compute_monthly_payment(loan.principal, loan.term_months, loan.annual_rate_percent)?;
        let verdict = LoanVerdict::from_payment(profile.free_cash_flow(), payment, loan.principal, loan.term_months);

        if let Some(warning) = &verdict.warning {
            warn!("{}", warning);
        }
        debug!(
            "loan {:.2} over {} months at {}%: payment={:.2} post_loan={:.2} viable={}",
            loan.principal,
            loan.term_months,
            loan.annual_rate_percent,
            verdict.monthly_payment,
            verdict.post_loan_cash_flow,
            verdict.is_viable
        );

        Ok(verdict)
    }

    /// Two-phase compounding debt projection at the given year checkpoints
    pub fn project_debt(
        &self,
        profile: &FinancialProfile,
        loan: &LoanRequest,
        verdict: &LoanVerdict,
        year_checkpoints: &[u32],
    ) -> Result<ProjectionResult> {
        Ok(self.projection_engine(year_checkpoints)?.project_debt(profile, loan, verdict))
    }

    /// Linear surplus projection over the loan term
    pub fn project_surplus(
        &self,
        loan: &LoanRequest,
        verdict: &LoanVerdict,
        year_checkpoints: &[u32],
    ) -> Result<ProjectionResult> {
        Ok(self.projection_engine(year_checkpoints)?.project_surplus(loan, verdict))
    }

    /// Debt or surplus projection depending on the verdict, at the configured checkpoints
    pub fn project(&self, profile: &FinancialProfile, loan: &LoanRequest, verdict: &LoanVerdict) -> Result<ProjectionResult> {
        Ok(self.projection_engine(&self.config.year_checkpoints)?.project(profile, loan, verdict))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DiagnosticError;
    use crate::loan::PreconditionWarning;
    use crate::profile::CashFlowAnalyzer;
    use crate::projection::ProjectionKind;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_reference_scenario_not_viable() {
        let engine = LoanViabilityEngine::default();
        let profile = CashFlowAnalyzer::analyze(10_000.0, 4_000.0, 3_000.0).unwrap();
        let loan = LoanRequest::new(50_000.0, 12, 40.0);

        let verdict = engine.evaluate(&profile, &loan).unwrap();
        assert_abs_diff_eq!(verdict.monthly_payment, 5_123.57, epsilon = 0.01);
        assert_abs_diff_eq!(verdict.post_loan_cash_flow, -2_123.57, epsilon = 0.01);
        assert!(!verdict.is_viable);
        assert_abs_diff_eq!(verdict.shortfall, 2_123.57, epsilon = 0.01);
        assert!(verdict.warning.is_none());
    }

    #[test]
    fn test_break_even_loan_is_viable() {
        let engine = LoanViabilityEngine::default();
        let profile = CashFlowAnalyzer::analyze(4_000.0, 2_000.0, 1_000.0).unwrap();
        let loan = LoanRequest::new(12_000.0, 12, 0.0);

        let verdict = engine.evaluate(&profile, &loan).unwrap();
        assert_eq!(verdict.post_loan_cash_flow, 0.0);
        assert!(verdict.is_viable);
    }

    #[test]
    fn test_existing_deficit_warns() {
        let engine = LoanViabilityEngine::default();
        let profile = CashFlowAnalyzer::analyze(3_000.0, 2_500.0, 1_000.0).unwrap();
        let loan = LoanRequest::new(6_000.0, 12, 0.0);

        let verdict = engine.evaluate(&profile, &loan).unwrap();
        assert_eq!(
            verdict.warning,
            Some(PreconditionWarning::ExistingStructuralDeficit { deficit: 500.0 })
        );
        assert_eq!(verdict.shortfall, 1_000.0);
    }

    #[test]
    fn test_invalid_term_propagates() {
        let engine = LoanViabilityEngine::default();
        let profile = CashFlowAnalyzer::analyze(3_000.0, 0.0, 0.0).unwrap();
        let loan = LoanRequest::new(6_000.0, 0, 10.0);

        assert_eq!(
            engine.evaluate(&profile, &loan).unwrap_err(),
            DiagnosticError::InvalidTerm { term_months: 0 }
        );
    }

    #[test]
    fn test_configured_term_limit() {
        let engine = LoanViabilityEngine::new(EngineConfig {
            max_term_months: 360,
            ..Default::default()
        });
        assert!(engine.compute_monthly_payment(100_000.0, 360, 10.0).is_ok());
        assert!(matches!(
            engine.compute_monthly_payment(100_000.0, 361, 10.0),
            Err(DiagnosticError::TermTooLong { max: 360, .. })
        ));
    }

    #[test]
    fn test_project_dispatches_on_verdict() {
        let engine = LoanViabilityEngine::default();
        let profile = CashFlowAnalyzer::analyze(10_000.0, 4_000.0, 3_000.0).unwrap();

        let bad = LoanRequest::new(50_000.0, 12, 40.0);
        let verdict = engine.evaluate(&profile, &bad).unwrap();
        assert_eq!(engine.project(&profile, &bad, &verdict).unwrap().kind, ProjectionKind::Debt);

        let good = LoanRequest::new(12_000.0, 12, 10.0);
        let verdict = engine.evaluate(&profile, &good).unwrap();
        assert_eq!(engine.project(&profile, &good, &verdict).unwrap().kind, ProjectionKind::Surplus);
    }

    #[test]
    fn test_project_debt_with_custom_checkpoints() {
        let engine = LoanViabilityEngine::default();
        let profile = CashFlowAnalyzer::analyze(10_000.0, 4_000.0, 3_000.0).unwrap();
        let loan = LoanRequest::new(50_000.0, 12, 40.0);
        let verdict = engine.evaluate(&profile, &loan).unwrap();

        let result = engine.project_debt(&profile, &loan, &verdict, &[4, 2]).unwrap();
        assert_eq!(result.checkpoints.len(), 2);
        assert_eq!(result.checkpoints[0].year, 2);
        assert_eq!(result.series.len(), 49);

        assert!(engine.project_debt(&profile, &loan, &verdict, &[0]).is_err());
    }

    #[test]
    fn test_checkpoints_past_configured_year_rejected() {
        let engine = LoanViabilityEngine::new(EngineConfig {
            max_checkpoint_year: 30,
            ..Default::default()
        });
        let profile = CashFlowAnalyzer::analyze(10_000.0, 4_000.0, 3_000.0).unwrap();
        let loan = LoanRequest::new(50_000.0, 12, 40.0);
        let verdict = engine.evaluate(&profile, &loan).unwrap();

        assert!(engine.project_debt(&profile, &loan, &verdict, &[30]).is_ok());
        assert_eq!(
            engine.project_debt(&profile, &loan, &verdict, &[1, 31]).unwrap_err(),
            DiagnosticError::InvalidCheckpoint { year: 31 }
        );
        assert_eq!(
            engine.project_surplus(&loan, &verdict, &[400_000_000]).unwrap_err(),
            DiagnosticError::InvalidCheckpoint { year: 400_000_000 }
        );
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let engine = LoanViabilityEngine::default();
        let profile = CashFlowAnalyzer::analyze(3_000.0, 2_500.0, 1_000.0).unwrap();
        let loan = LoanRequest::new(20_000.0, 18, 27.5);

        let a = engine.evaluate(&profile, &loan).unwrap();
        let b = engine.evaluate(&profile, &loan).unwrap();
        assert!(a.warning.is_some());

        assert_eq!(a.monthly_payment.to_bits(), b.monthly_payment.to_bits());
        assert_eq!(a.post_loan_cash_flow.to_bits(), b.post_loan_cash_flow.to_bits());
        assert_eq!(a.shortfall.to_bits(), b.shortfall.to_bits());
        assert_eq!(a.total_repaid.to_bits(), b.total_repaid.to_bits());
        assert_eq!(a.is_viable, b.is_viable);
        assert_eq!(a.warning, b.warning);
    }
}
