//! Fixed deposit: lump sum compounded to maturity

use super::DepositResult;
use crate::interest::compound_amount;
use crate::sanitize::NonNegative;

/// Maturity of a fixed deposit.
///
/// The term is converted to (possibly fractional) years and handed to
/// [`compound_amount`]. Unlike the other engines the month count is not
/// floored.
pub fn fixed_deposit(
    principal: f64,
    term_months: f64,
    annual_rate_percent: f64,
    compounding_per_year: f64,
) -> DepositResult {
    let principal = NonNegative::sanitize(principal).get();
    let years = NonNegative::sanitize(term_months).get() / 12.0;
    let maturity = compound_amount(principal, annual_rate_percent, years, compounding_per_year);

    DepositResult::from_maturity(maturity, principal)
}
