//! EMI computation and schedule generation

use log::debug;

use super::schedule::{AmortizationRow, LoanResult};
use crate::sanitize::{NonNegative, Term};

/// Compute the EMI and full amortization schedule for a loan.
///
/// # Arguments
/// * `principal` - Loan amount
/// * `annual_rate_percent` - Nominal annual rate, e.g. 12.0 for 12%
/// * `term_months` - Number of monthly installments (floored, at least 1)
///
/// A zero rate gives a straight-line repayment of `principal / n`.
pub fn compute_emi(principal: f64, annual_rate_percent: f64, term_months: f64) -> LoanResult {
    let principal = NonNegative::sanitize(principal).get();
    let monthly_rate = NonNegative::sanitize(annual_rate_percent).period_rate(Term::MONTHS_PER_YEAR);
    let n = Term::from_raw(term_months);

    let emi = if monthly_rate == 0.0 {
        principal / n.as_f64()
    } else {
        let growth = (1.0 + monthly_rate).powf(n.as_f64());
        principal * monthly_rate * growth / (growth - 1.0)
    };

    let schedule: Vec<AmortizationRow> = (1..=n.get())
        .scan(principal, |balance, period| {
            let interest = *balance * monthly_rate;
            let principal_component = emi - interest;
            // Clamp float residue on the final payments
            *balance = (*balance - principal_component).max(0.0);

            Some(AmortizationRow {
                period,
                payment: emi,
                interest_component: interest,
                principal_component,
                remaining_balance: *balance,
            })
        })
        .collect();

    let total_interest: f64 = schedule.iter().map(|r| r.interest_component).sum();

    debug!(
        "loan: principal={} rate={} months={} -> emi={:.6} total_interest={:.6}",
        principal,
        monthly_rate,
        n.get(),
        emi,
        total_interest
    );

    LoanResult {
        emi,
        total_interest,
        total_payment: principal + total_interest,
        schedule,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_standard_loan() {
        let result = compute_emi(100_000.0, 12.0, 12.0);

        assert!((result.emi - 8884.88).abs() < 0.01, "Expected EMI ~8884.88, got {}", result.emi);
        assert_eq!(result.schedule.len(), 12);
        assert_abs_diff_eq!(result.final_balance(), 0.0, epsilon = 1e-6);
        assert!((result.total_interest - 6618.55).abs() < 0.01);
    }

    #[test]
    fn test_emi_times_term_equals_total_payment() {
        let cases = [
            (100_000.0, 12.0, 12.0),
            (250_000.0, 8.5, 240.0),
            (5_000.0, 36.0, 7.0),
            (1.0, 0.5, 1.0),
            (750_000.0, 0.0, 60.0),
        ];

        for (p, r, n) in cases {
            let result = compute_emi(p, r, n);
            assert_relative_eq!(result.emi * n, result.total_payment, max_relative = 1e-6);
            assert_abs_diff_eq!(result.final_balance(), 0.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_zero_rate_is_straight_line() {
        let result = compute_emi(12_000.0, 0.0, 12.0);

        assert_eq!(result.emi, 1000.0);
        assert_eq!(result.total_interest, 0.0);
        assert!(result.schedule.iter().all(|r| r.interest_component == 0.0));
        assert_eq!(result.total_payment, 12_000.0);
    }

    #[test]
    fn test_schedule_ordering_and_balance() {
        let result = compute_emi(350_000.0, 9.25, 84.0);

        for (idx, row) in result.schedule.iter().enumerate() {
            assert_eq!(row.period, idx as u32 + 1);
            assert!(row.remaining_balance >= 0.0);
        }
        for pair in result.schedule.windows(2) {
            assert!(pair[1].remaining_balance <= pair[0].remaining_balance);
        }
    }

    #[test]
    fn test_principal_components_repay_loan() {
        let result = compute_emi(80_000.0, 10.0, 36.0);
        assert_relative_eq!(result.total_principal_repaid(), 80_000.0, max_relative = 1e-9);
    }

    #[test]
    fn test_degenerate_inputs_are_coerced() {
        let result = compute_emi(f64::NAN, -5.0, 0.0);

        assert_eq!(result.schedule.len(), 1);
        assert_eq!(result.emi, 0.0);
        assert_eq!(result.total_payment, 0.0);

        let fractional = compute_emi(10_000.0, 10.0, 6.7);
        assert_eq!(fractional.schedule.len(), 6);
    }
}
