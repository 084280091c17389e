//! Simple and compound interest

use log::debug;
use serde::{Deserialize, Serialize};

use crate::sanitize::{NonNegative, Term};

/// Final amount and the interest portion of it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InterestResult {
    pub amount: f64,
    pub interest: f64,
}

/// Simple interest: `P * r/100 * t`
pub fn simple_interest(principal: f64, annual_rate_percent: f64, years: f64) -> InterestResult {
    let p = NonNegative::sanitize(principal).get();
    let r = NonNegative::sanitize(annual_rate_percent).get() / 100.0;
    let t = NonNegative::sanitize(years).get();

    let interest = p * r * t;
    InterestResult {
        amount: p + interest,
        interest,
    }
}

/// Compound amount `P * (1 + r/(100*n))^(n*t)`.
///
/// `frequency_per_year` is floored and clamped to at least 1.
pub fn compound_amount(
    principal: f64,
    annual_rate_percent: f64,
    years: f64,
    frequency_per_year: f64,
) -> f64 {
    let p = NonNegative::sanitize(principal).get();
    let t = NonNegative::sanitize(years).get();
    let n = Term::from_raw(frequency_per_year);
    let i = NonNegative::sanitize(annual_rate_percent).period_rate(n);

    let amount = p * (1.0 + i).powf(n.as_f64() * t);
    debug!("compound: P={} i={} n={} t={} -> {}", p, i, n.get(), t, amount);
    amount
}

/// Compound interest split into amount and interest earned
pub fn compound_interest(
    principal: f64,
    annual_rate_percent: f64,
    years: f64,
    frequency_per_year: f64,
) -> InterestResult {
    let amount = compound_amount(principal, annual_rate_percent, years, frequency_per_year);
    InterestResult {
        amount,
        interest: amount - NonNegative::sanitize(principal).get(),
    }
}
