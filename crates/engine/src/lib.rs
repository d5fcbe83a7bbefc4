//! Ledger engine for a shared household mess.
//!
//! The [`Ledger`] owns members, expenses and unit prices, persists a snapshot
//! after every mutation and hands out read-only views. Derived figures (meal
//! rate, per-member balances) are computed by [`aggregate`] from those views.
//!
//! ```rust
//! use engine::{Ledger, MemoryStorage, Money};
//!
//! let mut ledger = Ledger::builder().storage(MemoryStorage::new()).build().unwrap();
//! ledger.add_meals(1, 3).unwrap();
//! ledger.add_expense("Groceries", Money::new(300.0)).unwrap();
//! assert_eq!(ledger.summary().total_meals, 3);
//! ```

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use serde::de::DeserializeOwned;

pub use aggregate::{GroupStanding, MemberStatement, Standing, Summary};
pub use error::EngineError;
pub use expense::{Expense, ExpenseId};
pub use member::{Counter, Member, MemberId};
pub use money::{CURRENCY_SUFFIX, Money};
pub use prices::{DEFAULT_EGG_PRICE, DEFAULT_RICE_PRICE, Prices};
pub use report::{ExportFormat, Report};
pub use storage::{FileStorage, MemoryStorage, SnapshotKey, Storage};

pub mod aggregate;
pub mod input;
pub mod report;

mod error;
mod expense;
mod member;
mod money;
mod ops;
mod prices;
mod storage;

pub type ResultEngine<T> = Result<T, EngineError>;

/// Authoritative state of the mess.
///
/// Every mutation first writes the changed collection to [`Storage`]; only
/// when the write succeeds is the in-memory state replaced and
/// [`version`](Ledger::version) bumped. A failed write leaves the ledger at
/// the last persisted snapshot.
#[derive(Debug)]
pub struct Ledger {
    members: Vec<Member>,
    expenses: Vec<Expense>,
    prices: Prices,
    timezone: Tz,
    version: u64,
    storage: Box<dyn Storage>,
}

impl Ledger {
    /// Return a builder for `Ledger`. Help to build the struct.
    pub fn builder() -> LedgerBuilder {
        LedgerBuilder::default()
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn member(&self, id: MemberId) -> Option<&Member> {
        self.members.iter().find(|member| member.id == id)
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn expense(&self, id: ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|expense| expense.id == id)
    }

    pub fn prices(&self) -> Prices {
        self.prices
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Monotonic counter bumped by every successful mutation. Callers can key
    /// a cached [`Summary`] on it.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Current calendar day in the ledger timezone.
    pub fn today(&self) -> NaiveDate {
        today_in(self.timezone)
    }

    /// Recomputes every derived figure from the current snapshot.
    pub fn summary(&self) -> Summary {
        Summary::compute(&self.members, &self.expenses, self.prices)
    }
}

/// Current calendar day in `timezone`.
pub fn today_in(timezone: Tz) -> NaiveDate {
    Utc::now().with_timezone(&timezone).date_naive()
}

/// The builder for `Ledger`
#[derive(Default)]
pub struct LedgerBuilder {
    storage: Option<Box<dyn Storage>>,
    timezone: Option<Tz>,
    default_prices: Option<Prices>,
}

impl LedgerBuilder {
    /// Pass the storage backend. Defaults to an empty [`MemoryStorage`].
    pub fn storage(mut self, storage: impl Storage + 'static) -> LedgerBuilder {
        self.storage = Some(Box::new(storage));
        self
    }

    /// Timezone used to date new expenses. Defaults to UTC.
    pub fn timezone(mut self, timezone: Tz) -> LedgerBuilder {
        self.timezone = Some(timezone);
        self
    }

    /// Prices used when the storage holds none.
    pub fn default_prices(mut self, prices: Prices) -> LedgerBuilder {
        self.default_prices = Some(prices);
        self
    }

    /// Construct `Ledger`, restoring the persisted snapshot.
    ///
    /// Missing keys fall back to the seed: five placeholder members, no
    /// expenses and the default prices. A key holding invalid JSON is an
    /// error rather than a silent reset.
    pub fn build(self) -> ResultEngine<Ledger> {
        let storage = self
            .storage
            .unwrap_or_else(|| Box::new(MemoryStorage::new()));

        let members = load(storage.as_ref(), SnapshotKey::Members)?;
        let expenses = load(storage.as_ref(), SnapshotKey::Expenses)?;
        let prices = load(storage.as_ref(), SnapshotKey::Prices)?;

        let restored = members.is_some();
        let ledger = Ledger {
            members: members.unwrap_or_else(member::seed_members),
            expenses: expenses.unwrap_or_default(),
            prices: prices.or(self.default_prices).unwrap_or_default(),
            timezone: self.timezone.unwrap_or(Tz::UTC),
            version: 0,
            storage,
        };

        tracing::info!(
            restored,
            members = ledger.members.len(),
            expenses = ledger.expenses.len(),
            "ledger loaded"
        );
        Ok(ledger)
    }
}

fn load<T: DeserializeOwned>(storage: &dyn Storage, key: SnapshotKey) -> ResultEngine<Option<T>> {
    match storage.read(key.as_str())? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}
