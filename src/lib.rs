//! Savings Calc - deterministic loan, deposit and savings calculators
//!
//! This library provides:
//! - Input sanitization into validated amounts and period counts
//! - Loan EMI and amortization schedules
//! - Simple and compound interest
//! - Recurring, fixed and daily deposit maturity values
//! - Chit fund auction simulation
//! - Goal planning (required monthly saving)
//!
//! Every engine is a pure function of its numeric inputs. Dispatch from raw
//! requests, history records and CSV export live in the outer `calculator`
//! and `export` modules.

pub mod sanitize;
pub mod error;
pub mod loan;
pub mod interest;
pub mod deposits;
pub mod chit_fund;
pub mod goal;
pub mod config;
pub mod calculator;
pub mod export;

// Re-export commonly used types
pub use sanitize::{sanitize, parse_amount, NonNegative, Term};
pub use error::CalcError;
pub use loan::{compute_emi, AmortizationRow, LoanResult};
pub use interest::{simple_interest, compound_amount, compound_interest, InterestResult};
pub use deposits::{recurring_deposit, fixed_deposit, daily_deposit, DepositResult};
pub use chit_fund::{chit_fund, try_chit_fund, ChitFundResult, ChitFundRow};
pub use goal::{goal_planner, try_goal_planner, annuity_factor, GoalPlan};
pub use config::CalculatorDefaults;
pub use calculator::{evaluate, CalculationRequest, CalculationOutput, CalculatorType};
