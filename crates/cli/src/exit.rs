//! Exit statuses of the `messbook` binary.

use engine::{EngineError, Money, ResultEngine, input};

/// A member or expense id that does not exist.
pub const NOT_FOUND: i32 = 1;
/// A destructive command that was declined or could not be confirmed.
pub const DECLINED: i32 = 1;
/// A bad name, amount or date on the command line.
pub const INVALID_INPUT: i32 = 2;

/// Status for errors that end the process quietly. `None` means the error
/// propagates out of `main`.
pub fn code_for(err: &EngineError) -> Option<i32> {
    match err {
        EngineError::KeyNotFound(_) => Some(NOT_FOUND),
        EngineError::InvalidName(_) | EngineError::InvalidAmount(_) | EngineError::InvalidDate(_) => {
            Some(INVALID_INPUT)
        }
        _ => None,
    }
}

/// How a destructive command may proceed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Confirmation {
    /// `--yes` was passed.
    Granted,
    /// Ask on the terminal.
    Prompt,
    /// No `--yes` and nobody to ask.
    Refused,
}

pub fn confirmation(yes: bool, interactive: bool) -> Confirmation {
    match (yes, interactive) {
        (true, _) => Confirmation::Granted,
        (false, true) => Confirmation::Prompt,
        (false, false) => Confirmation::Refused,
    }
}

/// Payment and expense amounts must be greater than zero.
pub fn positive_amount(raw: &str) -> ResultEngine<Money> {
    let amount = input::coerce_amount(raw);
    if amount.is_positive() {
        Ok(amount)
    } else {
        Err(EngineError::InvalidAmount(format!(
            "amount must be greater than zero: {raw}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_ids_exit_with_one() {
        let err = EngineError::KeyNotFound("member 9".to_string());
        assert_eq!(code_for(&err), Some(1));
    }

    #[test]
    fn bad_input_exits_with_two() {
        let name = EngineError::InvalidName("member name must not be empty".to_string());
        assert_eq!(code_for(&name), Some(2));
        assert_eq!(code_for(&positive_amount("0").unwrap_err()), Some(2));
        assert_eq!(code_for(&positive_amount("-5").unwrap_err()), Some(2));
        assert_eq!(code_for(&input::parse_date("31/05/2024").unwrap_err()), Some(2));
    }

    #[test]
    fn storage_errors_propagate() {
        let err = EngineError::Storage(std::io::Error::other("disk full"));
        assert_eq!(code_for(&err), None);
        assert_eq!(code_for(&EngineError::Export("bad".to_string())), None);
    }

    #[test]
    fn positive_amount_coerces_text() {
        assert_eq!(positive_amount(" 120.5 ").unwrap(), Money::new(120.5));
        assert!(positive_amount("lots").is_err());
    }

    #[test]
    fn destructive_commands_need_yes_without_a_terminal() {
        assert_eq!(confirmation(true, false), Confirmation::Granted);
        assert_eq!(confirmation(true, true), Confirmation::Granted);
        assert_eq!(confirmation(false, true), Confirmation::Prompt);
        assert_eq!(confirmation(false, false), Confirmation::Refused);
    }
}
