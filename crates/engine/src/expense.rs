//! The module contains the `Expense` type, money spent from the mess fund.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::Money;

/// Identifier of an [`Expense`], derived from its creation time in Unix millis.
pub type ExpenseId = i64;

/// A shared expense (groceries, gas, cook salary...).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: ExpenseId,
    pub description: String,
    /// Positive by convention. Forms reject non-positive input; the store
    /// keeps whatever it is given.
    pub amount: Money,
    /// Calendar day of the expense, serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
}

impl Expense {
    pub fn new(
        id: ExpenseId,
        description: impl Into<String>,
        amount: Money,
        date: NaiveDate,
    ) -> Self {
        Self {
            id,
            description: description.into(),
            amount,
            date,
        }
    }
}

impl core::fmt::Display for Expense {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} {} {}", self.date, self.amount, self.description)
    }
}

/// Next expense id: the creation timestamp, bumped past the current maximum
/// so that two expenses created in the same millisecond stay distinct.
pub(crate) fn next_expense_id(expenses: &[Expense], now_millis: i64) -> ExpenseId {
    match expenses.iter().map(|expense| expense.id).max() {
        Some(max) if max >= now_millis => max + 1,
        _ => now_millis,
    }
}
