//! Input sanitization for calculator entry points
//!
//! Every engine coerces its raw numeric inputs here before computing.
//! Bad input is never rejected: non-finite or negative values are replaced
//! with a fallback, and period counts are floored and clamped to at least 1.

use log::debug;
use serde::Serialize;

/// Return `n` if it is finite and non-negative, otherwise `fallback`.
pub fn sanitize(n: f64, fallback: f64) -> f64 {
    if n.is_finite() && n >= 0.0 {
        n
    } else {
        debug!("substituting fallback {} for invalid input {}", fallback, n);
        fallback
    }
}

/// Parse a raw form value such as `"₹1,00,000"` or `" 12.5 % "`.
///
/// Everything except ASCII digits, `.` and `-` is stripped before parsing.
/// Unparseable input yields `0.0`. The result is not sanitized; engines do
/// that at their own boundary.
pub fn parse_amount(raw: &str) -> f64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    cleaned.parse::<f64>().unwrap_or(0.0)
}

/// A finite, non-negative real number (money amount or annual rate percent)
///
/// Only produced by the sanitizer, so formulas downstream can rely on it.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize)]
#[serde(transparent)]
pub struct NonNegative(f64);

impl NonNegative {
    pub const ZERO: NonNegative = NonNegative(0.0);

    /// Sanitize with the default fallback of zero
    pub fn sanitize(n: f64) -> Self {
        Self(sanitize(n, 0.0))
    }

    /// Sanitize with an explicit fallback.
    ///
    /// An invalid fallback is itself coerced to zero.
    pub fn sanitize_or(n: f64, fallback: f64) -> Self {
        Self(sanitize(n, sanitize(fallback, 0.0)))
    }

    pub fn get(self) -> f64 {
        self.0
    }

    /// Convert an annual percentage into a per-period decimal rate
    pub fn period_rate(self, periods_per_year: Term) -> f64 {
        self.0 / 100.0 / periods_per_year.as_f64()
    }
}

impl From<NonNegative> for f64 {
    fn from(value: NonNegative) -> Self {
        value.0
    }
}

/// A count of periods (months, days, compounding periods per year), at least 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Term(u32);

impl Term {
    pub const ONE: Term = Term(1);
    pub const MONTHS_PER_YEAR: Term = Term(12);

    /// Floor a raw value and clamp it to a minimum of one period.
    ///
    /// NaN and negative values clamp to 1; very large values saturate at
    /// `u32::MAX`. Schedule-building engines allocate one row per period, so
    /// callers handling untrusted input should cap the count first (the
    /// request dispatcher caps at `calculator::MAX_PERIODS`).
    pub fn from_raw(n: f64) -> Self {
        let floored = n.floor();
        if floored.is_nan() || floored < 1.0 {
            debug!("clamping period count {} to 1", n);
            return Self::ONE;
        }

        // `as` saturates at u32::MAX for out-of-range floats
        Self(floored as u32)
    }

    /// Build from an already-integral count, clamping zero to one
    pub fn new(n: u32) -> Self {
        Self(n.max(1))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        self.0 as f64
    }
}

impl Default for Term {
    fn default() -> Self {
        Self::ONE
    }
}
