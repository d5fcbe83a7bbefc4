use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Suffix used when a `Money` value is shown to a user (Bangladeshi taka).
pub const CURRENCY_SUFFIX: &str = "tk";

/// Signed money amount in taka.
///
/// Amounts are plain `f64` values: the mess ledger only needs the precision
/// of a paper register, and derived values such as the meal rate are
/// fractional anyway (e.g. `445 / 15`). Rounding happens on display only.
///
/// The value is signed:
/// - positive = payment received / credit
/// - negative = deficit / debit
///
/// # Examples
///
/// ```rust
/// use engine::Money;
///
/// let amount = Money::new(12.5);
/// assert_eq!(amount.to_string(), "12.50 tk");
/// ```
///
/// Parsing from user input (accepts `.` or `,` as decimal separator; rejects >
/// 2 decimals):
///
/// ```rust
/// use engine::Money;
///
/// assert_eq!("10".parse::<Money>().unwrap().value(), 10.0);
/// assert_eq!("10,5".parse::<Money>().unwrap().value(), 10.5);
/// assert!("12.345".parse::<Money>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Money(f64);

impl Money {
    pub const ZERO: Money = Money(0.0);

    /// Creates a new amount.
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// Returns the raw value in taka.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Returns `true` if the amount is 0.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }

    /// Returns `true` if the amount is positive.
    #[must_use]
    pub fn is_positive(self) -> bool {
        self.0 > 0.0
    }

    /// Returns `true` if the amount is negative.
    #[must_use]
    pub fn is_negative(self) -> bool {
        self.0 < 0.0
    }

    /// Returns `false` for NaN and infinities, which JSON cannot hold.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    #[must_use]
    pub fn abs(self) -> Money {
        Money(self.0.abs())
    }

    /// Clamps negative amounts to zero.
    #[must_use]
    pub fn non_negative(self) -> Money {
        if self.0 > 0.0 { self } else { Money::ZERO }
    }

    /// Formats the amount without the currency suffix, rounded to 2 decimals.
    #[must_use]
    pub fn plain(self) -> String {
        // Avoid printing "-0.00" for tiny negative rounding residues.
        if self.0.abs() < 0.005 {
            return "0.00".to_string();
        }
        format!("{:.2}", self.0)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {CURRENCY_SUFFIX}", self.plain())
    }
}

impl From<f64> for Money {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl From<Money> for f64 {
    fn from(value: Money) -> Self {
        value.0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Self::Output {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Self::Output {
        Money(-self.0)
    }
}

/// Unit price times a count (e.g. rice units).
impl Mul<u64> for Money {
    type Output = Money;

    fn mul(self, rhs: u64) -> Self::Output {
        Money(self.0 * rhs as f64)
    }
}

/// Amount split over a number of units. Callers guard against zero.
impl Div<u64> for Money {
    type Output = Money;

    fn div(self, rhs: u64) -> Self::Output {
        Money(self.0 / rhs as f64)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl FromStr for Money {
    type Err = EngineError;

    /// Parses a decimal string into taka.
    ///
    /// Accepts `.` or `,` as decimal separator, an optional leading `+`/`-`
    /// and an optional trailing `tk`.
    ///
    /// Validation rules:
    /// - max 2 fractional digits (rejects `12.345`)
    /// - rejects empty/invalid strings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let empty = || EngineError::InvalidAmount("empty amount".to_string());
        let invalid = || EngineError::InvalidAmount("invalid amount".to_string());

        let trimmed = s.trim();
        // The suffix trails the sign and digits (`-5 tk`), so it goes first.
        let trimmed = trimmed
            .strip_suffix(CURRENCY_SUFFIX)
            .map(str::trim_end)
            .unwrap_or(trimmed);
        if trimmed.is_empty() {
            return Err(empty());
        }

        let (negative, rest) = if let Some(stripped) = trimmed.strip_prefix('-') {
            (true, stripped)
        } else if let Some(stripped) = trimmed.strip_prefix('+') {
            (false, stripped)
        } else {
            (false, trimmed)
        };

        let rest = rest.trim();
        if rest.is_empty() {
            return Err(empty());
        }

        let rest = rest.replace(',', ".");
        let mut parts = rest.split('.');
        let whole = parts.next().ok_or_else(invalid)?;
        let frac = parts.next().unwrap_or("");

        if parts.next().is_some() {
            return Err(invalid());
        }
        if whole.is_empty() || !whole.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        if !frac.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        if frac.len() > 2 {
            return Err(EngineError::InvalidAmount("too many decimals".to_string()));
        }

        let normalized = if frac.is_empty() {
            whole.to_string()
        } else {
            format!("{whole}.{frac}")
        };
        let value: f64 = normalized.parse().map_err(|_| invalid())?;
        if !value.is_finite() {
            return Err(EngineError::InvalidAmount("amount too large".to_string()));
        }

        Ok(Money(if negative { -value } else { value }))
    }
}
