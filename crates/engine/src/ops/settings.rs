use crate::{Expense, Ledger, Member, Prices, ResultEngine, SnapshotKey};

use super::finite_amount;

impl Ledger {
    /// Replaces the unit prices. Stored counts are untouched.
    pub fn set_prices(&mut self, prices: Prices) -> ResultEngine<()> {
        let prices = Prices::new(
            finite_amount(prices.rice, "rice price")?.non_negative(),
            finite_amount(prices.egg, "egg price")?.non_negative(),
        );
        self.persist(SnapshotKey::Prices, &prices)?;
        self.prices = prices;
        self.bump_version();
        tracing::info!(rice = %prices.rice, egg = %prices.egg, "prices updated");
        Ok(())
    }

    /// Factory reset: empties members and expenses. Prices are kept.
    ///
    /// Both collections are written or neither is: when the second write
    /// fails the first key is restored to the current members.
    pub fn clear_all(&mut self) -> ResultEngine<()> {
        let members: Vec<Member> = Vec::new();
        let expenses: Vec<Expense> = Vec::new();
        let previous_members = serde_json::to_string(&self.members)?;

        self.persist(SnapshotKey::Members, &members)?;
        if let Err(err) = self.persist(SnapshotKey::Expenses, &expenses) {
            if let Err(restore) = self
                .storage
                .write(SnapshotKey::Members.as_str(), &previous_members)
            {
                tracing::error!(key = %SnapshotKey::Members, "failed to restore snapshot: {restore}");
            }
            return Err(err);
        }

        self.members = members;
        self.expenses = expenses;
        self.bump_version();
        tracing::info!("ledger cleared");
        Ok(())
    }
}
