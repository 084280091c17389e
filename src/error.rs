//! Error types for the checked calculator entry points

use thiserror::Error;

/// Mathematical singularities that the plain entry points let through as
/// NaN/Infinity
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    /// The dividend is shared among `members - 1` non-winning members
    #[error("chit fund needs at least 2 members to share a dividend, got {members}")]
    SingleMemberChit { members: u32 },

    /// The annuity factor divides by the periodic rate; a rate too small to
    /// move `1 + i` collapses it to zero as well
    #[error("goal planner needs an interest rate large enough to compound, got {annual_rate_percent}%")]
    ZeroGoalRate { annual_rate_percent: f64 },
}
