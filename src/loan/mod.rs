//! Loan amortization: EMI computation and payment schedules

mod engine;
mod schedule;

pub use engine::compute_emi;
pub use schedule::{AmortizationRow, LoanResult};
