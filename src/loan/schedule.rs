//! Amortization schedule output structures

use serde::{Deserialize, Serialize};

/// One period of an amortization schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    /// Period number, starting at 1
    pub period: u32,
    /// Installment paid this period (the EMI)
    pub payment: f64,
    pub interest_component: f64,
    pub principal_component: f64,
    /// Outstanding principal after this payment, never negative
    pub remaining_balance: f64,
}

/// Complete loan calculation result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanResult {
    /// Equated monthly installment
    pub emi: f64,

    /// Sum of the interest components over the schedule
    pub total_interest: f64,

    /// Principal plus total interest
    pub total_payment: f64,

    /// Period-by-period breakdown, one row per month of the term
    pub schedule: Vec<AmortizationRow>,
}

impl LoanResult {
    /// Balance left after the last payment.
    ///
    /// Floating point residue means this is close to, not exactly, zero.
    pub fn final_balance(&self) -> f64 {
        self.schedule
            .last()
            .map(|r| r.remaining_balance)
            .unwrap_or(0.0)
    }

    /// Sum of the principal components over the schedule
    pub fn total_principal_repaid(&self) -> f64 {
        self.schedule.iter().map(|r| r.principal_component).sum()
    }
}
