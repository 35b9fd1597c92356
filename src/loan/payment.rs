//! Fixed monthly payment for an amortizing loan
//!
//! Standard annuity formula:
//! `payment = P * r * (1 + r)^N / ((1 + r)^N - 1)`
//! where `r` is the monthly rate and `N` the term in months.

use crate::error::{ensure_amount, DiagnosticError, Result};

/// Calculate the fixed monthly payment
///
/// Cases, in order:
/// 1. `term_months <= 0` fails with `InvalidTerm`, `term_months > max_term_months`
///    with `TermTooLong`
/// 2. zero rate: straight-line `principal / term_months`
/// 3. positive rate: annuity formula
///
/// The annuity denominator `(1 + r)^N - 1` can round to zero for a tiny `r` and a
/// short term. In that case the straight-line payment is used instead of dividing
/// by zero. This is a numeric-stability guard only.
pub fn monthly_payment(
    principal: f64,
    term_months: i32,
    annual_rate_percent: f64,
    max_term_months: i32,
) -> Result<f64> {
    if term_months <= 0 {
        return Err(DiagnosticError::InvalidTerm { term_months });
    }
    if term_months > max_term_months {
        return Err(DiagnosticError::TermTooLong {
            term_months,
            max: max_term_months,
        });
    }
    let principal = ensure_amount("principal", principal)?;
    let annual_rate_percent = ensure_amount("annual_rate_percent", annual_rate_percent)?;

    let n = term_months as f64;
    if annual_rate_percent == 0.0 {
        return Ok(principal / n);
    }

    let r = annual_rate_percent / 100.0 / 12.0;
    let growth = (1.0 + r).powi(term_months);
    let denominator = growth - 1.0;

    if !denominator.is_finite() || denominator <= 0.0 {
        return Ok(principal / n);
    }

    Ok(principal * r * growth / denominator)
}

/// Total paid over the life of the loan
pub fn total_repaid(monthly_payment: f64, term_months: i32) -> f64 {
    monthly_payment * term_months.max(0) as f64
}
