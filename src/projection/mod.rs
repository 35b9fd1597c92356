//! Debt and surplus projection over a multi-year horizon

mod state;
mod engine;
mod series;

pub use engine::ProjectionEngine;
pub use series::{BalancePoint, DebtProjectionPoint, ProjectionKind, ProjectionResult, ProjectionSummary};
