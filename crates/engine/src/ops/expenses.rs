use chrono::{NaiveDate, Utc};

use crate::{
    EngineError, Expense, ExpenseId, Ledger, Money, ResultEngine, SnapshotKey,
    expense::next_expense_id,
};

use super::finite_amount;

impl Ledger {
    fn commit_expenses(&mut self, expenses: Vec<Expense>) -> ResultEngine<()> {
        self.persist(SnapshotKey::Expenses, &expenses)?;
        self.expenses = expenses;
        self.bump_version();
        Ok(())
    }

    /// Records an expense dated today (ledger timezone) and returns its id.
    pub fn add_expense(&mut self, description: &str, amount: Money) -> ResultEngine<ExpenseId> {
        let today = self.today();
        self.add_expense_on(description, amount, today)
    }

    /// Records an expense on an explicit date.
    pub fn add_expense_on(
        &mut self,
        description: &str,
        amount: Money,
        date: NaiveDate,
    ) -> ResultEngine<ExpenseId> {
        let amount = finite_amount(amount, "expense amount")?;
        let id = next_expense_id(&self.expenses, Utc::now().timestamp_millis());
        let mut expenses = self.expenses.clone();
        expenses.push(Expense::new(id, description.trim(), amount, date));
        self.commit_expenses(expenses)?;
        tracing::debug!(expense_id = id, %amount, %date, "expense added");
        Ok(id)
    }

    /// Overwrites description and amount; the date is kept.
    pub fn update_expense(
        &mut self,
        id: ExpenseId,
        description: &str,
        amount: Money,
    ) -> ResultEngine<()> {
        let amount = finite_amount(amount, "expense amount")?;
        let mut expenses = self.expenses.clone();
        let Some(expense) = expenses.iter_mut().find(|expense| expense.id == id) else {
            tracing::warn!(expense_id = id, op = "update", "expense not found");
            return Err(expense_not_found(id));
        };
        expense.description = description.trim().to_string();
        expense.amount = amount;
        self.commit_expenses(expenses)?;
        tracing::debug!(expense_id = id, "expense updated");
        Ok(())
    }

    pub fn delete_expense(&mut self, id: ExpenseId) -> ResultEngine<Expense> {
        let Some(index) = self.expenses.iter().position(|expense| expense.id == id) else {
            tracing::warn!(expense_id = id, op = "delete", "expense not found");
            return Err(expense_not_found(id));
        };
        let mut expenses = self.expenses.clone();
        let removed = expenses.remove(index);
        self.commit_expenses(expenses)?;
        tracing::debug!(expense_id = id, "expense deleted");
        Ok(removed)
    }
}

fn expense_not_found(id: ExpenseId) -> EngineError {
    EngineError::KeyNotFound(format!("expense {id}"))
}
