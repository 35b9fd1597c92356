//! Loan payment calculation and viability evaluation

mod request;
mod payment;
mod verdict;
mod engine;

pub use request::LoanRequest;
pub use payment::{monthly_payment, total_repaid};
pub use verdict::{LoanVerdict, PreconditionWarning};
pub use engine::LoanViabilityEngine;
