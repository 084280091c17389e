//! Daily deposit maturity approximation

use super::DepositResult;
use crate::sanitize::{NonNegative, Term};

/// Maturity of a daily deposit scheme.
///
/// Interest uses an average-balance approximation:
/// `daily * (N/2) * (r/100/365) * N`. This is not true daily compounding.
pub fn daily_deposit(daily_amount: f64, total_days: f64, annual_rate_percent: f64) -> DepositResult {
    let daily = NonNegative::sanitize(daily_amount).get();
    let days = Term::from_raw(total_days).as_f64();
    let r = NonNegative::sanitize(annual_rate_percent).get() / 100.0;

    let total_deposit = daily * days;
    let average_days = days / 2.0;
    let interest = daily * average_days * (r / 365.0) * days;

    DepositResult {
        maturity: total_deposit + interest,
        interest,
        total_deposit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_average_balance_heuristic() {
        let result = daily_deposit(100.0, 365.0, 6.0);

        assert_eq!(result.total_deposit, 36_500.0);
        // 100 * 182.5 * (0.06/365) * 365 = 1095
        assert_relative_eq!(result.interest, 1095.0, max_relative = 1e-12);
        assert_relative_eq!(result.maturity, 37_595.0, max_relative = 1e-12);
    }

    #[test]
    fn test_days_are_floored() {
        let result = daily_deposit(10.0, 30.8, 0.0);
        assert_eq!(result.total_deposit, 300.0);
        assert_eq!(result.interest, 0.0);
        assert_eq!(result.maturity, 300.0);
    }

    #[test]
    fn test_zero_days_clamps_to_one() {
        let result = daily_deposit(50.0, 0.0, 10.0);
        assert_eq!(result.total_deposit, 50.0);
    }
}
