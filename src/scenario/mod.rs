//! Request/response boundary over the engines
//!
//! A caller hands over a complete [`DiagnosisRequest`] and gets back a complete
//! [`Diagnosis`]. Nothing is retained between calls, so re-running after every
//! input change is the expected usage.

pub mod loader;

use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::error::Result;
use crate::loan::{LoanRequest, LoanVerdict, LoanViabilityEngine};
use crate::profile::{CashFlowAnalyzer, FinancialProfile, LifestyleVerdict};
use crate::projection::ProjectionResult;

pub use loader::{load_requests, load_requests_from_reader};

/// Complete input bundle for one diagnosis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisRequest {
    /// Caller-chosen identifier, echoed back
    #[serde(default)]
    pub id: Option<String>,
    pub monthly_income: f64,
    pub fixed_expenses: f64,
    pub variable_expenses: f64,
    /// Loan to evaluate, if any. A zero principal means no loan.
    #[serde(default)]
    pub loan: Option<LoanRequest>,
}

impl DiagnosisRequest {
    pub fn new(monthly_income: f64, fixed_expenses: f64, variable_expenses: f64) -> Self {
        Self {
            id: None,
            monthly_income,
            fixed_expenses,
            variable_expenses,
            loan: None,
        }
    }

    pub fn with_loan(mut self, loan: LoanRequest) -> Self {
        self.loan = Some(loan);
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// Complete result bundle for one diagnosis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnosis {
    pub id: Option<String>,
    pub profile: FinancialProfile,
    pub total_expenses: f64,
    pub free_cash_flow: f64,
    pub lifestyle: LifestyleVerdict,
    pub loan: Option<LoanDiagnosis>,
}

/// Loan part of a diagnosis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanDiagnosis {
    pub request: LoanRequest,
    pub verdict: LoanVerdict,
    pub projection: ProjectionResult,
}

/// Payment and verdict at one rate of a sweep
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    pub annual_rate_percent: f64,
    pub monthly_payment: f64,
    pub post_loan_cash_flow: f64,
    pub is_viable: bool,
}

/// Runs diagnoses against a fixed engine configuration
#[derive(Debug, Clone, Default)]
pub struct DiagnosisRunner {
    engine: LoanViabilityEngine,
}

impl DiagnosisRunner {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            engine: LoanViabilityEngine::new(config),
        }
    }

    pub fn engine(&self) -> &LoanViabilityEngine {
        &self.engine
    }

    /// Analyze the profile, then evaluate and project the loan if one is given
    pub fn run(&self, request: &DiagnosisRequest) -> Result<Diagnosis> {
        let profile = CashFlowAnalyzer::analyze(
            request.monthly_income,
            request.fixed_expenses,
            request.variable_expenses,
        )?;

        let loan = match request.loan {
            Some(loan) if loan.principal == 0.0 => {
                info!("loan principal is zero; skipping loan evaluation");
                None
            }
            Some(loan) => Some(self.diagnose_loan(&profile, loan)?),
            None => None,
        };

        Ok(Diagnosis {
            id: request.id.clone(),
            profile,
            total_expenses: profile.total_expenses(),
            free_cash_flow: profile.free_cash_flow(),
            lifestyle: profile.verdict(),
            loan,
        })
    }

    fn diagnose_loan(&self, profile: &FinancialProfile, loan: LoanRequest) -> Result<LoanDiagnosis> {
        let verdict = self.engine.evaluate(profile, &loan)?;
        let projection = self.engine.project(profile, &loan, &verdict)?;
        Ok(LoanDiagnosis {
            request: loan,
            verdict,
            projection,
        })
    }

    /// Run independent requests in parallel; results keep the input order
    pub fn run_batch(&self, requests: &[DiagnosisRequest]) -> Vec<Result<Diagnosis>> {
        requests.par_iter().map(|r| self.run(r)).collect()
    }

    /// Evaluate the same loan at each annual rate
    pub fn sweep_rates(
        &self,
        profile: &FinancialProfile,
        loan: &LoanRequest,
        rates: &[f64],
    ) -> Result<Vec<SweepPoint>> {
        rates
            .par_iter()
            .map(|&annual_rate_percent| {
                let loan = LoanRequest {
                    annual_rate_percent,
                    ..*loan
                };
                let verdict = self.engine.evaluate(profile, &loan)?;
                Ok(SweepPoint {
                    annual_rate_percent,
                    monthly_payment: verdict.monthly_payment,
                    post_loan_cash_flow: verdict.post_loan_cash_flow,
                    is_viable: verdict.is_viable,
                })
            })
            .collect()
    }
}

/// Most rates a single sweep will produce
pub const MAX_SWEEP_POINTS: usize = 10_000;

/// Rates from `start` to `end` inclusive in `step` increments
///
/// Truncated to the first [`MAX_SWEEP_POINTS`] rates when the step is too fine.
pub fn rate_range(start: f64, end: f64, step: f64) -> Vec<f64> {
    if !step.is_finite() || step <= 0.0 || end < start {
        return vec![start];
    }
    let count = ((end - start) / step + 1e-9).floor() as usize;
    let count = count.min(MAX_SWEEP_POINTS - 1);
    (0..=count).map(|i| start + step * i as f64).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DiagnosticError;
    use crate::projection::ProjectionKind;

    fn request() -> DiagnosisRequest {
        DiagnosisRequest::new(10_000.0, 4_000.0, 3_000.0)
    }

    #[test]
    fn test_profile_only() {
        let diagnosis = DiagnosisRunner::default().run(&request()).unwrap();
        assert_eq!(diagnosis.free_cash_flow, 3_000.0);
        assert_eq!(diagnosis.total_expenses, 7_000.0);
        assert!(diagnosis.lifestyle.is_within_means());
        assert!(diagnosis.loan.is_none());
    }

    #[test]
    fn test_with_unaffordable_loan() {
        let req = request().with_id("a").with_loan(LoanRequest::new(50_000.0, 12, 40.0));
        let diagnosis = DiagnosisRunner::default().run(&req).unwrap();

        assert_eq!(diagnosis.id.as_deref(), Some("a"));
        let loan = diagnosis.loan.unwrap();
        assert!(!loan.verdict.is_viable);
        assert_eq!(loan.projection.kind, ProjectionKind::Debt);
        assert_eq!(loan.projection.checkpoints.len(), 6);
    }

    #[test]
    fn test_zero_principal_skips_loan() {
        let req = request().with_loan(LoanRequest::new(0.0, 12, 25.0));
        let diagnosis = DiagnosisRunner::default().run(&req).unwrap();
        assert!(diagnosis.loan.is_none());
    }

    #[test]
    fn test_errors_reported() {
        let bad = DiagnosisRequest::new(-1.0, 0.0, 0.0);
        assert!(matches!(
            DiagnosisRunner::default().run(&bad),
            Err(DiagnosticError::InvalidInput { .. })
        ));

        let bad_term = request().with_loan(LoanRequest::new(1_000.0, -3, 10.0));
        assert_eq!(
            DiagnosisRunner::default().run(&bad_term).unwrap_err(),
            DiagnosticError::InvalidTerm { term_months: -3 }
        );
    }

    #[test]
    fn test_batch_preserves_order() {
        let requests = vec![
            request().with_id("1"),
            DiagnosisRequest::new(-5.0, 0.0, 0.0).with_id("2"),
            request().with_id("3").with_loan(LoanRequest::new(1_000.0, 10, 0.0)),
        ];
        let results = DiagnosisRunner::default().run_batch(&requests);

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().id.as_deref(), Some("1"));
        assert!(results[1].is_err());
        assert!(results[2].as_ref().unwrap().loan.as_ref().unwrap().verdict.is_viable);
    }

    #[test]
    fn test_sweep_rates() {
        let runner = DiagnosisRunner::default();
        let profile = CashFlowAnalyzer::analyze(10_000.0, 4_000.0, 3_000.0).unwrap();
        let loan = LoanRequest::new(30_000.0, 12, 0.0);

        let points = runner.sweep_rates(&profile, &loan, &rate_range(0.0, 100.0, 10.0)).unwrap();
        assert_eq!(points.len(), 11);
        assert!(points[0].is_viable);
        assert!(points.windows(2).all(|w| w[1].monthly_payment > w[0].monthly_payment));
        assert!(!points[10].is_viable);
    }

    #[test]
    fn test_rate_range() {
        assert_eq!(rate_range(0.0, 1.0, 0.5), vec![0.0, 0.5, 1.0]);
        assert_eq!(rate_range(5.0, 5.0, 1.0), vec![5.0]);
        assert_eq!(rate_range(5.0, 1.0, 1.0), vec![5.0]);
        assert_eq!(rate_range(0.0, 1.0, f64::NAN), vec![0.0]);
    }

    #[test]
    fn test_rate_range_is_capped() {
        let rates = rate_range(0.0, 100.0, 1e-12);
        assert_eq!(rates.len(), MAX_SWEEP_POINTS);
        assert_eq!(rates[0], 0.0);

        assert_eq!(rate_range(0.0, f64::MAX, 1e-300).len(), MAX_SWEEP_POINTS);
    }
}
