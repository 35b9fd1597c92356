//! Income and expense profile with cash-flow diagnosis

mod data;
mod analyzer;

pub use data::{FinancialProfile, LifestyleVerdict};
pub use analyzer::CashFlowAnalyzer;
