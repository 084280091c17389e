//! Recurring deposit: monthly installments with periodic compounding

use log::debug;

use super::DepositResult;
use crate::sanitize::{NonNegative, Term};

/// Maturity of a recurring deposit.
///
/// Each installment made in month `j` earns `floor(cpy/12 * (n - j + 1))`
/// full compounding periods before maturity. Partial periods earn nothing.
///
/// # Arguments
/// * `monthly_amount` - Installment paid at the start of every month
/// * `term_months` - Number of installments (floored, at least 1)
/// * `annual_rate_percent` - Nominal annual rate
/// * `compounding_per_year` - Compounding periods per year, usually 4
pub fn recurring_deposit(
    monthly_amount: f64,
    term_months: f64,
    annual_rate_percent: f64,
    compounding_per_year: f64,
) -> DepositResult {
    let monthly = NonNegative::sanitize(monthly_amount).get();
    let n = Term::from_raw(term_months);
    let cpy = Term::from_raw(compounding_per_year);
    let i = NonNegative::sanitize(annual_rate_percent).period_rate(cpy);
    let periods_per_month = cpy.as_f64() / 12.0;

    let maturity: f64 = (1..=n.get())
        .map(|j| {
            let periods = (periods_per_month * (n.get() - j + 1) as f64).floor();
            monthly * (1.0 + i).powf(periods)
        })
        .sum();

    debug!(
        "recurring deposit: monthly={} months={} cpy={} -> maturity={}",
        monthly,
        n.get(),
        cpy.get(),
        maturity
    );

    DepositResult::from_maturity(maturity, monthly * n.as_f64())
}
