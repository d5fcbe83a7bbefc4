//! Coercion of raw user input at the UI/CLI boundary.
//!
//! Numeric fields never reject input: anything unparsable or negative becomes
//! zero, matching a paper register where a blank cell counts as nothing.
//! Callers that need a strictly positive value check the coerced result.

use chrono::NaiveDate;

use crate::{EngineError, Money, ResultEngine};

/// Largest count a single stepper entry accepts.
pub const MAX_ENTRY_COUNT: u32 = 9;

/// Parses a count, mapping invalid or negative input to 0.
pub fn coerce_count(raw: &str) -> u32 {
    match raw.trim().parse::<i64>() {
        Ok(value) if value > 0 => u32::try_from(value).unwrap_or(u32::MAX),
        Ok(_) => 0,
        Err(_) => {
            tracing::debug!(raw, "unparsable count coerced to 0");
            0
        }
    }
}

/// Parses an amount, mapping invalid or negative input to zero.
pub fn coerce_amount(raw: &str) -> Money {
    match raw.parse::<Money>() {
        Ok(amount) => amount.non_negative(),
        Err(err) => {
            tracing::debug!(raw, "unparsable amount coerced to 0: {err}");
            Money::ZERO
        }
    }
}

/// Moves a stepper value by `delta`, staying within `0..=MAX_ENTRY_COUNT`.
pub fn step_entry_count(current: u32, delta: i32) -> u32 {
    let next = i64::from(current) + i64::from(delta);
    next.clamp(0, i64::from(MAX_ENTRY_COUNT)) as u32
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(raw: &str) -> ResultEngine<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| EngineError::InvalidDate(format!("{raw}: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_are_clamped_at_zero() {
        assert_eq!(coerce_count("7"), 7);
        assert_eq!(coerce_count(" 12 "), 12);
        assert_eq!(coerce_count("-3"), 0);
        assert_eq!(coerce_count("abc"), 0);
        assert_eq!(coerce_count(""), 0);
        assert_eq!(coerce_count("99999999999"), u32::MAX);
    }

    #[test]
    fn amounts_are_clamped_at_zero() {
        assert_eq!(coerce_amount("150.5"), Money::new(150.5));
        assert_eq!(coerce_amount("-20"), Money::ZERO);
        assert_eq!(coerce_amount("twenty"), Money::ZERO);
    }

    #[test]
    fn stepper_stays_in_range() {
        assert_eq!(step_entry_count(0, -1), 0);
        assert_eq!(step_entry_count(3, 1), 4);
        assert_eq!(step_entry_count(MAX_ENTRY_COUNT, 1), MAX_ENTRY_COUNT);
    }

    #[test]
    fn dates_use_iso_format() {
        assert_eq!(
            parse_date("2024-03-09").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
        );
        assert!(parse_date("09/03/2024").is_err());
    }
}
