//! Goal planner: required periodic saving to reach a target

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::CalcError;
use crate::sanitize::{NonNegative, Term};

/// Annual rate assumed when the caller does not supply one
pub const DEFAULT_GOAL_RATE_PERCENT: f64 = 7.0;

/// Compounding frequency assumed when the caller does not supply one
pub const DEFAULT_GOAL_COMPOUNDING: f64 = 12.0;

/// Result of a goal plan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalPlan {
    /// Contribution needed every period to close the gap
    pub required_monthly: f64,
}

/// Future value of an annuity of 1 per period: `((1+i)^n - 1) / i`.
///
/// Undefined (NaN) for `i == 0`.
pub fn annuity_factor(period_rate: f64, periods: u32) -> f64 {
    ((1.0 + period_rate).powf(periods as f64) - 1.0) / period_rate
}

/// Periodic contribution needed to grow from `existing_savings` to `goal_amount`.
///
/// Only the shortfall is financed; existing savings are not assumed to earn
/// interest. A zero rate makes the annuity factor undefined and the result
/// NaN; [`try_goal_planner`] reports that case as an error instead.
pub fn goal_planner(
    goal_amount: f64,
    duration_months: f64,
    existing_savings: f64,
    annual_rate_percent: f64,
    compounding_per_year: f64,
) -> GoalPlan {
    let plan = solve(
        goal_amount,
        duration_months,
        existing_savings,
        annual_rate_percent,
        compounding_per_year,
    );

    if !plan.required_monthly.is_finite() {
        warn!(
            "goal planner produced a non-finite contribution at rate {}%",
            annual_rate_percent
        );
    }

    GoalPlan {
        required_monthly: plan.required_monthly,
    }
}

/// Like [`goal_planner`], but rejects a rate that is zero, invalid, or too
/// small to compound (`1 + i == 1`), so the result is always finite
pub fn try_goal_planner(
    goal_amount: f64,
    duration_months: f64,
    existing_savings: f64,
    annual_rate_percent: f64,
    compounding_per_year: f64,
) -> Result<GoalPlan, CalcError> {
    let plan = solve(
        goal_amount,
        duration_months,
        existing_savings,
        annual_rate_percent,
        compounding_per_year,
    );

    if !plan.factor.is_finite() || plan.factor <= 0.0 || !plan.required_monthly.is_finite() {
        return Err(CalcError::ZeroGoalRate { annual_rate_percent });
    }

    Ok(GoalPlan {
        required_monthly: plan.required_monthly,
    })
}

struct Solution {
    factor: f64,
    required_monthly: f64,
}

fn solve(
    goal_amount: f64,
    duration_months: f64,
    existing_savings: f64,
    annual_rate_percent: f64,
    compounding_per_year: f64,
) -> Solution {
    let goal = NonNegative::sanitize(goal_amount).get();
    let savings = NonNegative::sanitize(existing_savings).get();
    let gap = (goal - savings).max(0.0);
    let n = Term::from_raw(duration_months);
    let i = NonNegative::sanitize(annual_rate_percent).period_rate(Term::from_raw(compounding_per_year));

    let factor = annuity_factor(i, n.get());
    Solution {
        factor,
        required_monthly: gap / factor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_contribution_reaches_goal() {
        let plan = goal_planner(1_000_000.0, 120.0, 0.0, 7.0, 12.0);
        let factor = annuity_factor(0.07 / 12.0, 120);

        assert_relative_eq!(plan.required_monthly * factor, 1_000_000.0, max_relative = 1e-9);
        // Known value for 1M over 10 years at 7% monthly
        assert!((plan.required_monthly - 5778.0).abs() < 1.0, "got {}", plan.required_monthly);
    }

    #[test]
    fn test_existing_savings_reduce_gap() {
        let without = goal_planner(500_000.0, 60.0, 0.0, 8.0, 12.0);
        let with = goal_planner(500_000.0, 60.0, 200_000.0, 8.0, 12.0);
        assert_relative_eq!(with.required_monthly, without.required_monthly * 0.6, max_relative = 1e-9);
    }

    #[test]
    fn test_goal_already_met() {
        let plan = goal_planner(100_000.0, 24.0, 150_000.0, 7.0, 12.0);
        assert_eq!(plan.required_monthly, 0.0);
    }

    #[test]
    fn test_zero_rate_is_nan() {
        let plan = goal_planner(100_000.0, 24.0, 0.0, 0.0, 12.0);
        assert!(plan.required_monthly.is_nan() || plan.required_monthly.is_infinite());
    }

    #[test]
    fn test_try_goal_planner() {
        let err = try_goal_planner(100_000.0, 24.0, 0.0, 0.0, 12.0).unwrap_err();
        assert!(matches!(err, CalcError::ZeroGoalRate { .. }));

        let err = try_goal_planner(100_000.0, 24.0, 0.0, -3.0, 12.0).unwrap_err();
        assert!(matches!(err, CalcError::ZeroGoalRate { .. }));

        let plan = try_goal_planner(100_000.0, 24.0, 0.0, DEFAULT_GOAL_RATE_PERCENT, DEFAULT_GOAL_COMPOUNDING).unwrap();
        assert!(plan.required_monthly.is_finite());
    }

    #[test]
    fn test_try_goal_planner_rejects_vanishing_rate() {
        // 1e-15 / 100 / 12 rounds away in 1 + i, so the factor collapses to zero
        assert_eq!(annuity_factor(1e-15 / 100.0 / 12.0, 24), 0.0);

        let err = try_goal_planner(100_000.0, 24.0, 0.0, 1e-15, 12.0).unwrap_err();
        assert_eq!(err, CalcError::ZeroGoalRate { annual_rate_percent: 1e-15 });
    }
}
