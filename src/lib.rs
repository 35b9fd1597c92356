//! Cash-flow diagnostic - personal finance affordability engine
//!
//! This library provides:
//! - Cash-flow diagnosis from monthly income and expenses
//! - Fixed monthly payment for an amortizing loan
//! - Loan viability verdict with a separate pre-existing deficit warning
//! - Two-phase compounding debt projection and linear surplus projection
//! - Batch diagnosis and interest-rate sweeps

pub mod config;
pub mod error;
pub mod profile;
pub mod loan;
pub mod projection;
pub mod scenario;

// Re-export commonly used types
pub use config::EngineConfig;
pub use error::{DiagnosticError, Result};
pub use profile::{CashFlowAnalyzer, FinancialProfile, LifestyleVerdict};
pub use loan::{LoanRequest, LoanVerdict, LoanViabilityEngine, PreconditionWarning};
pub use projection::{BalancePoint, DebtProjectionPoint, ProjectionEngine, ProjectionKind, ProjectionResult};
pub use scenario::{Diagnosis, DiagnosisRequest, DiagnosisRunner};
