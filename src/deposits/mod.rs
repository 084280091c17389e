//! Deposit maturity engines: recurring, fixed and daily deposits

mod daily;
mod fixed;
mod recurring;

pub use daily::daily_deposit;
pub use fixed::fixed_deposit;
pub use recurring::recurring_deposit;

use serde::{Deserialize, Serialize};

/// Default compounding frequency for recurring and fixed deposits (quarterly)
pub const DEFAULT_DEPOSIT_COMPOUNDING: f64 = 4.0;

/// Maturity breakdown shared by all deposit engines
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepositResult {
    /// Value at maturity
    pub maturity: f64,
    /// Maturity minus total deposited
    pub interest: f64,
    /// Sum of all contributions
    pub total_deposit: f64,
}

impl DepositResult {
    fn from_maturity(maturity: f64, total_deposit: f64) -> Self {
        Self {
            maturity,
            interest: maturity - total_deposit,
            total_deposit,
        }
    }
}
