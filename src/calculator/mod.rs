//! Calculator dispatch
//!
//! Ties raw form-style requests to the engines: unit conversion, defaults for
//! optional parameters, and the one-line summary stored with each history
//! record. Singularities are reported as [`CalcError`] here so that stored and
//! exported results never contain NaN or infinite values.

mod history;

pub use history::{record_calculation, CalculationRecord, HistoryError, HistoryStore, MemoryHistory};

use std::fmt;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Deserializer, Serialize};

use crate::chit_fund::{try_chit_fund, ChitFundResult};
use crate::config::CalculatorDefaults;
use crate::deposits::{daily_deposit, fixed_deposit, recurring_deposit, DepositResult};
use crate::error::CalcError;
use crate::goal::{try_goal_planner, GoalPlan};
use crate::interest::{compound_interest, simple_interest, InterestResult};
use crate::loan::{compute_emi, LoanResult};
use crate::sanitize::parse_amount;

/// Kind of calculator, as stored alongside history records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculatorType {
    ChitFund,
    DailyDeposit,
    Rd,
    Fd,
    LoanEmi,
    Interest,
    GoalPlanner,
}

impl CalculatorType {
    pub const ALL: [CalculatorType; 7] = [
        CalculatorType::ChitFund,
        CalculatorType::DailyDeposit,
        CalculatorType::Rd,
        CalculatorType::Fd,
        CalculatorType::LoanEmi,
        CalculatorType::Interest,
        CalculatorType::GoalPlanner,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CalculatorType::ChitFund => "chit_fund",
            CalculatorType::DailyDeposit => "daily_deposit",
            CalculatorType::Rd => "rd",
            CalculatorType::Fd => "fd",
            CalculatorType::LoanEmi => "loan_emi",
            CalculatorType::Interest => "interest",
            CalculatorType::GoalPlanner => "goal_planner",
        }
    }
}

impl fmt::Display for CalculatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CalculatorType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CalculatorType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("Unknown calculator type: {}", s))
    }
}

/// Unit the user entered a rate in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateUnit {
    #[default]
    PerAnnum,
    PerMonth,
}

impl RateUnit {
    /// Convert to an annual percentage (a monthly rate is multiplied by 12)
    pub fn to_annual(self, rate: f64) -> f64 {
        match self {
            RateUnit::PerAnnum => rate,
            RateUnit::PerMonth => rate * 12.0,
        }
    }
}

/// Unit the user entered a duration in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeUnit {
    #[default]
    Years,
    Months,
}

impl TimeUnit {
    pub fn to_years(self, value: f64) -> f64 {
        match self {
            TimeUnit::Years => value,
            TimeUnit::Months => value / 12.0,
        }
    }
}

/// Longest term, in months, that the dispatcher passes to the loan, recurring
/// deposit and chit fund engines. Those engines walk every period, so larger
/// requests are capped here.
pub const MAX_PERIODS: f64 = 1200.0;

fn cap_periods(n: f64) -> f64 {
    if n > MAX_PERIODS {
        debug!("capping period count {} at {}", n, MAX_PERIODS);
        MAX_PERIODS
    } else {
        n
    }
}

/// A JSON number or a formatted string such as `"1,00,000"`
#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Number(f64),
    Text(String),
}

impl RawNumber {
    fn value(self) -> f64 {
        match self {
            RawNumber::Number(n) => n,
            RawNumber::Text(s) => parse_amount(&s),
        }
    }
}

fn raw_amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(RawNumber::deserialize(deserializer)?.value())
}

/// Like `raw_amount`, for optional parameters; `null` reads as absent
fn raw_optional_amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(Option::<RawNumber>::deserialize(deserializer)?.map(RawNumber::value))
}

/// Raw inputs for one calculation, tagged by calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "calculator", rename_all = "snake_case")]
pub enum CalculationRequest {
    LoanEmi {
        #[serde(deserialize_with = "raw_amount")]
        principal: f64,
        #[serde(deserialize_with = "raw_amount")]
        rate: f64,
        #[serde(default)]
        rate_unit: RateUnit,
        #[serde(deserialize_with = "raw_amount")]
        months: f64,
    },
    Interest {
        #[serde(deserialize_with = "raw_amount")]
        principal: f64,
        #[serde(deserialize_with = "raw_amount")]
        rate: f64,
        #[serde(default)]
        rate_unit: RateUnit,
        #[serde(deserialize_with = "raw_amount")]
        time: f64,
        #[serde(default)]
        time_unit: TimeUnit,
        #[serde(default, deserialize_with = "raw_optional_amount")]
        frequency: Option<f64>,
    },
    Rd {
        #[serde(deserialize_with = "raw_amount")]
        monthly_amount: f64,
        #[serde(deserialize_with = "raw_amount")]
        months: f64,
        #[serde(deserialize_with = "raw_amount")]
        rate: f64,
        #[serde(default, deserialize_with = "raw_optional_amount")]
        compounding_per_year: Option<f64>,
    },
    Fd {
        #[serde(deserialize_with = "raw_amount")]
        principal: f64,
        #[serde(deserialize_with = "raw_amount")]
        months: f64,
        #[serde(deserialize_with = "raw_amount")]
        rate: f64,
        #[serde(default, deserialize_with = "raw_optional_amount")]
        compounding_per_year: Option<f64>,
    },
    DailyDeposit {
        #[serde(deserialize_with = "raw_amount")]
        daily_amount: f64,
        #[serde(deserialize_with = "raw_amount")]
        days: f64,
        #[serde(deserialize_with = "raw_amount")]
        rate: f64,
    },
    ChitFund {
        #[serde(deserialize_with = "raw_amount")]
        total_amount: f64,
        #[serde(deserialize_with = "raw_amount")]
        members: f64,
        #[serde(deserialize_with = "raw_amount")]
        commission_percent: f64,
        #[serde(deserialize_with = "raw_amount")]
        months: f64,
    },
    GoalPlanner {
        #[serde(deserialize_with = "raw_amount")]
        goal_amount: f64,
        #[serde(deserialize_with = "raw_amount")]
        months: f64,
        #[serde(default, deserialize_with = "raw_amount")]
        existing_savings: f64,
        #[serde(default, deserialize_with = "raw_optional_amount")]
        rate: Option<f64>,
        #[serde(default, deserialize_with = "raw_optional_amount")]
        compounding_per_year: Option<f64>,
    },
}

impl CalculationRequest {
    pub fn calculator_type(&self) -> CalculatorType {
        match self {
            CalculationRequest::LoanEmi { .. } => CalculatorType::LoanEmi,
            CalculationRequest::Interest { .. } => CalculatorType::Interest,
            CalculationRequest::Rd { .. } => CalculatorType::Rd,
            CalculationRequest::Fd { .. } => CalculatorType::Fd,
            CalculationRequest::DailyDeposit { .. } => CalculatorType::DailyDeposit,
            CalculationRequest::ChitFund { .. } => CalculatorType::ChitFund,
            CalculationRequest::GoalPlanner { .. } => CalculatorType::GoalPlanner,
        }
    }
}

/// Simple and compound interest evaluated on the same inputs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InterestComparison {
    pub simple: InterestResult,
    pub compound: InterestResult,
}

/// Result of one calculation, tagged by calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "calculator", rename_all = "snake_case")]
pub enum CalculationOutput {
    LoanEmi(LoanResult),
    Interest(InterestComparison),
    Rd(DepositResult),
    Fd(DepositResult),
    DailyDeposit(DepositResult),
    ChitFund(ChitFundResult),
    GoalPlanner(GoalPlan),
}

impl CalculationOutput {
    pub fn calculator_type(&self) -> CalculatorType {
        match self {
            CalculationOutput::LoanEmi(_) => CalculatorType::LoanEmi,
            CalculationOutput::Interest(_) => CalculatorType::Interest,
            CalculationOutput::Rd(_) => CalculatorType::Rd,
            CalculationOutput::Fd(_) => CalculatorType::Fd,
            CalculationOutput::DailyDeposit(_) => CalculatorType::DailyDeposit,
            CalculationOutput::ChitFund(_) => CalculatorType::ChitFund,
            CalculationOutput::GoalPlanner(_) => CalculatorType::GoalPlanner,
        }
    }

    /// One-line description stored with a history record
    pub fn summary(&self) -> String {
        match self {
            CalculationOutput::LoanEmi(r) => {
                format!("EMI {:.2} | Interest {:.2}", r.emi, r.total_interest)
            }
            CalculationOutput::Interest(r) => {
                format!("SI: {:.2} | CI: {:.2}", r.simple.interest, r.compound.interest)
            }
            CalculationOutput::Rd(r) => format!("RD Maturity {:.2}", r.maturity),
            CalculationOutput::Fd(r) => format!("FD Maturity {:.2}", r.maturity),
            CalculationOutput::DailyDeposit(r) => format!("Daily Maturity {:.2}", r.maturity),
            CalculationOutput::ChitFund(r) => format!(
                "Chit monthly {:.2} over {} months",
                r.monthly_contribution,
                r.table.len()
            ),
            CalculationOutput::GoalPlanner(r) => format!("Monthly {:.2}", r.required_monthly),
        }
    }
}

/// Run the engine matching `request`.
///
/// Optional parameters the request leaves out are taken from `defaults`.
/// Terms of the period-walking engines are capped at [`MAX_PERIODS`].
pub fn evaluate(
    request: &CalculationRequest,
    defaults: &CalculatorDefaults,
) -> Result<CalculationOutput, CalcError> {
    let output = match *request {
        CalculationRequest::LoanEmi { principal, rate, rate_unit, months } => {
            CalculationOutput::LoanEmi(compute_emi(principal, rate_unit.to_annual(rate), cap_periods(months)))
        }
        CalculationRequest::Interest { principal, rate, rate_unit, time, time_unit, frequency } => {
            let annual = rate_unit.to_annual(rate);
            let years = time_unit.to_years(time);
            let frequency = frequency.unwrap_or(defaults.interest_compounding_per_year);
            CalculationOutput::Interest(InterestComparison {
                simple: simple_interest(principal, annual, years),
                compound: compound_interest(principal, annual, years, frequency),
            })
        }
        CalculationRequest::Rd { monthly_amount, months, rate, compounding_per_year } => {
            CalculationOutput::Rd(recurring_deposit(
                monthly_amount,
                cap_periods(months),
                rate,
                compounding_per_year.unwrap_or(defaults.deposit_compounding_per_year),
            ))
        }
        CalculationRequest::Fd { principal, months, rate, compounding_per_year } => {
            CalculationOutput::Fd(fixed_deposit(
                principal,
                months,
                rate,
                compounding_per_year.unwrap_or(defaults.deposit_compounding_per_year),
            ))
        }
        CalculationRequest::DailyDeposit { daily_amount, days, rate } => {
            CalculationOutput::DailyDeposit(daily_deposit(daily_amount, days, rate))
        }
        CalculationRequest::ChitFund { total_amount, members, commission_percent, months } => {
            CalculationOutput::ChitFund(try_chit_fund(total_amount, members, commission_percent, cap_periods(months))?)
        }
        CalculationRequest::GoalPlanner { goal_amount, months, existing_savings, rate, compounding_per_year } => {
            CalculationOutput::GoalPlanner(try_goal_planner(
                goal_amount,
                months,
                existing_savings,
                rate.unwrap_or(defaults.goal_annual_rate_percent),
                compounding_per_year.unwrap_or(defaults.goal_compounding_per_year),
            )?)
        }
    };

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> CalculatorDefaults {
        CalculatorDefaults::default()
    }

    #[test]
    fn test_calculator_type_round_trip_names() {
        for t in CalculatorType::ALL {
            assert_eq!(t.as_str().parse::<CalculatorType>().unwrap(), t);
            assert_eq!(serde_json::to_value(t).unwrap(), serde_json::json!(t.as_str()));
        }
        assert!("mortgage".parse::<CalculatorType>().is_err());
    }

    #[test]
    fn test_per_month_rate_is_annualized() {
        let monthly = CalculationRequest::LoanEmi {
            principal: 100_000.0,
            rate: 1.0,
            rate_unit: RateUnit::PerMonth,
            months: 12.0,
        };
        let annual = CalculationRequest::LoanEmi {
            principal: 100_000.0,
            rate: 12.0,
            rate_unit: RateUnit::PerAnnum,
            months: 12.0,
        };

        assert_eq!(evaluate(&monthly, &defaults()).unwrap(), evaluate(&annual, &defaults()).unwrap());
    }

    #[test]
    fn test_interest_time_in_months() {
        let request = CalculationRequest::Interest {
            principal: 10_000.0,
            rate: 10.0,
            rate_unit: RateUnit::PerAnnum,
            time: 24.0,
            time_unit: TimeUnit::Months,
            frequency: Some(4.0),
        };

        match evaluate(&request, &defaults()).unwrap() {
            CalculationOutput::Interest(r) => {
                assert!((r.simple.interest - 2000.0).abs() < 1e-9);
                assert!(r.compound.interest > r.simple.interest);
            }
            other => panic!("unexpected output {:?}", other),
        }
    }

    #[test]
    fn test_deserialize_formatted_strings() {
        let json = r#"{
            "calculator": "loan_emi",
            "principal": "₹1,00,000",
            "rate": 12,
            "months": "12"
        }"#;
        let request: CalculationRequest = serde_json::from_str(json).unwrap();

        assert_eq!(
            request,
            CalculationRequest::LoanEmi {
                principal: 100_000.0,
                rate: 12.0,
                rate_unit: RateUnit::PerAnnum,
                months: 12.0,
            }
        );
    }

    #[test]
    fn test_goal_planner_uses_defaults() {
        let json = r#"{ "calculator": "goal_planner", "goal_amount": 1000000, "months": 120 }"#;
        let request: CalculationRequest = serde_json::from_str(json).unwrap();

        let output = evaluate(&request, &defaults()).unwrap();
        let expected = crate::goal::goal_planner(1_000_000.0, 120.0, 0.0, 7.0, 12.0);
        assert_eq!(output, CalculationOutput::GoalPlanner(expected));
    }

    #[test]
    fn test_singularities_become_errors() {
        let chit = CalculationRequest::ChitFund {
            total_amount: 10_000.0,
            members: 1.0,
            commission_percent: 5.0,
            months: 5.0,
        };
        assert!(matches!(evaluate(&chit, &defaults()), Err(CalcError::SingleMemberChit { .. })));

        let goal = CalculationRequest::GoalPlanner {
            goal_amount: 10_000.0,
            months: 12.0,
            existing_savings: 0.0,
            rate: Some(0.0),
            compounding_per_year: None,
        };
        assert!(matches!(evaluate(&goal, &defaults()), Err(CalcError::ZeroGoalRate { .. })));
    }

    #[test]
    fn test_vanishing_goal_rate_is_an_error() {
        let goal = CalculationRequest::GoalPlanner {
            goal_amount: 100_000.0,
            months: 24.0,
            existing_savings: 0.0,
            rate: Some(1e-15),
            compounding_per_year: Some(12.0),
        };
        assert!(matches!(evaluate(&goal, &defaults()), Err(CalcError::ZeroGoalRate { .. })));
    }

    #[test]
    fn test_deserialize_optional_formatted_strings() {
        let json = r#"{
            "calculator": "goal_planner",
            "goal_amount": "100000",
            "months": "24",
            "rate": "7",
            "compounding_per_year": "12"
        }"#;
        let request: CalculationRequest = serde_json::from_str(json).unwrap();

        assert_eq!(
            request,
            CalculationRequest::GoalPlanner {
                goal_amount: 100_000.0,
                months: 24.0,
                existing_savings: 0.0,
                rate: Some(7.0),
                compounding_per_year: Some(12.0),
            }
        );

        let json = r#"{ "calculator": "rd", "monthly_amount": 1000, "months": 12, "rate": "6.5", "compounding_per_year": null }"#;
        let request: CalculationRequest = serde_json::from_str(json).unwrap();
        assert!(matches!(request, CalculationRequest::Rd { compounding_per_year: None, .. }));

        let json = r#"{ "calculator": "interest", "principal": 1000, "rate": 10, "time": 2, "frequency": "4 / yr" }"#;
        let request: CalculationRequest = serde_json::from_str(json).unwrap();
        assert!(matches!(request, CalculationRequest::Interest { frequency: Some(f), .. } if f == 4.0));
    }

    #[test]
    fn test_huge_terms_are_capped() {
        let loan = CalculationRequest::LoanEmi {
            principal: 100_000.0,
            rate: 12.0,
            rate_unit: RateUnit::PerAnnum,
            months: 1e12,
        };
        match evaluate(&loan, &defaults()).unwrap() {
            CalculationOutput::LoanEmi(r) => assert_eq!(r.schedule.len(), MAX_PERIODS as usize),
            other => panic!("unexpected output {:?}", other),
        }

        let rd = CalculationRequest::Rd {
            monthly_amount: 100.0,
            months: f64::INFINITY,
            rate: 6.0,
            compounding_per_year: None,
        };
        match evaluate(&rd, &defaults()).unwrap() {
            CalculationOutput::Rd(r) => assert_eq!(r.total_deposit, 100.0 * MAX_PERIODS),
            other => panic!("unexpected output {:?}", other),
        }

        let chit = CalculationRequest::ChitFund {
            total_amount: 100_000.0,
            members: 10.0,
            commission_percent: 5.0,
            months: 1e9,
        };
        match evaluate(&chit, &defaults()).unwrap() {
            CalculationOutput::ChitFund(r) => assert_eq!(r.table.len(), MAX_PERIODS as usize),
            other => panic!("unexpected output {:?}", other),
        }
    }

    #[test]
    fn test_summaries() {
        let loan = evaluate(
            &CalculationRequest::LoanEmi {
                principal: 100_000.0,
                rate: 12.0,
                rate_unit: RateUnit::PerAnnum,
                months: 12.0,
            },
            &defaults(),
        )
        .unwrap();
        assert_eq!(loan.summary(), "EMI 8884.88 | Interest 6618.55");
        assert_eq!(loan.calculator_type(), CalculatorType::LoanEmi);

        let fd = evaluate(
            &CalculationRequest::Fd {
                principal: 50_000.0,
                months: 12.0,
                rate: 6.5,
                compounding_per_year: None,
            },
            &defaults(),
        )
        .unwrap();
        assert_eq!(fd.summary(), "FD Maturity 53330.08");

        let chit = evaluate(
            &CalculationRequest::ChitFund {
                total_amount: 100_000.0,
                members: 10.0,
                commission_percent: 5.0,
                months: 10.0,
            },
            &defaults(),
        )
        .unwrap();
        assert_eq!(chit.summary(), "Chit monthly 10000.00 over 10 months");
    }

    #[test]
    fn test_output_serializes_with_tag() {
        let output = CalculationOutput::GoalPlanner(GoalPlan { required_monthly: 10.0 });
        let value = serde_json::to_value(&output).unwrap();
        assert_eq!(value["calculator"], "goal_planner");
        assert_eq!(value["required_monthly"], 10.0);
    }
}
