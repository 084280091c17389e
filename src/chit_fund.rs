//! Chit fund auction simulator
//!
//! Simulates a rotating savings scheme month by month. Real auctions are
//! competitive; here the winning bid follows a deterministic schedule:
//! - the bid discount ramps linearly with the month, reaching 10% of the
//!   pot in the final month
//! - the foreman takes a commission on the winning bid
//! - whatever the pool collects beyond the bid is shared among the other
//!   `members - 1` members as a dividend
//! - winners rotate round-robin through member slots

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::CalcError;
use crate::sanitize::{NonNegative, Term};

/// Largest bid discount, as a fraction of the pot, reached in the last month
pub const MAX_BID_DISCOUNT: f64 = 0.10;

/// One month of the auction ledger
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChitFundRow {
    /// Month number, starting at 1
    pub month: u32,
    /// Member slot receiving the pot, in `1..=members`
    pub winner_slot: u32,
    /// Amount paid out to the winner
    pub bid_amount: f64,
    /// Share of the surplus paid to each non-winning member
    pub dividend_per_member: f64,
    /// Commission taken from the winning bid
    pub foreman_fee: f64,
}

/// Complete chit fund simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChitFundResult {
    pub monthly_contribution: f64,
    pub table: Vec<ChitFundRow>,
}

impl ChitFundResult {
    /// Total commission collected by the foreman over the whole run
    pub fn total_foreman_fees(&self) -> f64 {
        self.table.iter().map(|r| r.foreman_fee).sum()
    }
}

/// Simulate a chit fund.
///
/// With a single member the dividend divides by zero and the table carries
/// NaN or infinite dividends. Use [`try_chit_fund`] to reject that case.
///
/// # Arguments
/// * `total_amount` - Nominal pot
/// * `members` - Number of members (floored, at least 1)
/// * `commission_percent` - Foreman commission on the winning bid
/// * `duration_months` - Length of the scheme (floored, at least 1)
pub fn chit_fund(
    total_amount: f64,
    members: f64,
    commission_percent: f64,
    duration_months: f64,
) -> ChitFundResult {
    let members = Term::from_raw(members);
    let result = simulate(total_amount, members, commission_percent, duration_months);

    if result.table.iter().any(|r| !r.dividend_per_member.is_finite()) {
        warn!(
            "chit fund with {} member(s) produced a non-finite dividend",
            members.get()
        );
    }

    result
}

/// Like [`chit_fund`], but rejects a single-member fund instead of producing
/// non-finite dividends
pub fn try_chit_fund(
    total_amount: f64,
    members: f64,
    commission_percent: f64,
    duration_months: f64,
) -> Result<ChitFundResult, CalcError> {
    let members = Term::from_raw(members);
    if members.get() < 2 {
        return Err(CalcError::SingleMemberChit {
            members: members.get(),
        });
    }

    Ok(simulate(total_amount, members, commission_percent, duration_months))
}

fn simulate(
    total_amount: f64,
    members: Term,
    commission_percent: f64,
    duration_months: f64,
) -> ChitFundResult {
    let pot = NonNegative::sanitize(total_amount).get();
    let duration = Term::from_raw(duration_months);
    let foreman_rate = NonNegative::sanitize(commission_percent).get() / 100.0;
    let monthly_contribution = pot / duration.as_f64();
    let collected = members.as_f64() * monthly_contribution;

    let table: Vec<ChitFundRow> = (1..=duration.get())
        .map(|month| {
            let bid_discount = MAX_BID_DISCOUNT * (month as f64 / duration.as_f64());
            let bid_amount = pot * (1.0 - bid_discount);
            let foreman_fee = bid_amount * foreman_rate;
            let pool = collected - foreman_fee;

            ChitFundRow {
                month,
                winner_slot: (month - 1) % members.get() + 1,
                bid_amount,
                dividend_per_member: (pool - bid_amount) / (members.as_f64() - 1.0),
                foreman_fee,
            }
        })
        .collect();

    debug!(
        "chit fund: pot={} members={} months={} -> monthly={}",
        pot,
        members.get(),
        duration.get(),
        monthly_contribution
    );

    ChitFundResult {
        monthly_contribution,
        table,
    }
}
