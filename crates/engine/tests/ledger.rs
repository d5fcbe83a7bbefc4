use chrono::NaiveDate;

use engine::{
    Counter, EngineError, FileStorage, Ledger, Member, MemoryStorage, Money, Prices, ResultEngine,
    SnapshotKey, Storage,
};

fn ledger_with(storage: &MemoryStorage) -> Ledger {
    Ledger::builder().storage(storage.clone()).build().unwrap()
}

fn empty_ledger() -> (Ledger, MemoryStorage) {
    let storage = MemoryStorage::new();
    storage.insert("members", "[]");
    (ledger_with(&storage), storage)
}

#[derive(Debug, Default)]
struct ReadOnlyStorage {
    inner: MemoryStorage,
}

impl Storage for ReadOnlyStorage {
    fn read(&self, key: &str) -> ResultEngine<Option<String>> {
        self.inner.read(key)
    }

    fn write(&mut self, _key: &str, _value: &str) -> ResultEngine<()> {
        Err(std::io::Error::new(std::io::ErrorKind::Other, "quota exceeded").into())
    }
}

/// Shares entries with `inner` but refuses writes to one key.
#[derive(Debug)]
struct FailingKeyStorage {
    inner: MemoryStorage,
    failing: &'static str,
}

impl Storage for FailingKeyStorage {
    fn read(&self, key: &str) -> ResultEngine<Option<String>> {
        self.inner.read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> ResultEngine<()> {
        if key == self.failing {
            return Err(std::io::Error::other("disk full").into());
        }
        self.inner.write(key, value)
    }
}

#[test]
fn fresh_storage_seeds_five_placeholder_members() {
    let ledger = Ledger::builder().build().unwrap();

    let names: Vec<&str> = ledger.members().iter().map(|m| m.name.as_str()).collect();
    assert_eq!(
        names,
        ["Member 1", "Member 2", "Member 3", "Member 4", "Member 5"]
    );
    assert!(ledger.members().iter().all(|m| m.is_active && m.meals == 0));
    assert!(ledger.expenses().is_empty());
    assert_eq!(ledger.prices(), Prices::default());
    assert_eq!(ledger.prices().rice, Money::new(20.0));
    assert_eq!(ledger.prices().egg, Money::new(15.0));
}

#[test]
fn add_member_uses_max_plus_one_without_filling_gaps() {
    let storage = MemoryStorage::new();
    let members = vec![
        Member::new(1, "A"),
        Member::new(2, "B"),
        Member::new(4, "D"),
    ];
    storage.insert("members", serde_json::to_string(&members).unwrap());
    let mut ledger = ledger_with(&storage);

    let id = ledger.add_member("  Rahim ").unwrap();

    assert_eq!(id, 5);
    let member = ledger.member(5).unwrap();
    assert_eq!(member.name, "Rahim");
    assert_eq!(member.payments, Money::ZERO);
    assert!(member.is_active);
}

#[test]
fn add_member_on_empty_ledger_starts_at_one() {
    let (mut ledger, _) = empty_ledger();
    assert_eq!(ledger.add_member("First").unwrap(), 1);
}

#[test]
fn add_member_rejects_blank_names() {
    let mut ledger = Ledger::builder().build().unwrap();
    let err = ledger.add_member("   ").unwrap_err();
    assert!(matches!(err, EngineError::InvalidName(_)));
    assert_eq!(ledger.members().len(), 5);
    assert_eq!(ledger.version(), 0);
}

#[test]
fn remove_member_keeps_other_ids() {
    let mut ledger = Ledger::builder().build().unwrap();

    let removed = ledger.remove_member(3).unwrap();

    assert_eq!(removed.id, 3);
    let ids: Vec<u32> = ledger.members().iter().map(|m| m.id).collect();
    assert_eq!(ids, [1, 2, 4, 5]);
}

#[test]
fn unknown_ids_leave_state_untouched() {
    let storage = MemoryStorage::new();
    let mut ledger = ledger_with(&storage);
    let before = ledger.members().to_vec();

    assert_eq!(
        ledger.remove_member(42).unwrap_err(),
        EngineError::KeyNotFound("member 42".to_string())
    );
    assert!(ledger.add_meals(42, 3).is_err());
    assert!(ledger.toggle_active(42).is_err());
    assert!(ledger.update_name(42, "Ghost").is_err());
    assert!(ledger.set_payment_total(42, Money::new(10.0)).is_err());
    assert!(ledger.update_expense(7, "x", Money::new(1.0)).is_err());
    assert_eq!(
        ledger.delete_expense(7).unwrap_err(),
        EngineError::KeyNotFound("expense 7".to_string())
    );

    assert_eq!(ledger.members(), before.as_slice());
    assert_eq!(ledger.version(), 0);
    assert!(storage.is_empty());
}

#[test]
fn counters_increment_and_overwrite() {
    let mut ledger = Ledger::builder().build().unwrap();

    ledger.add_meals(1, 3).unwrap();
    ledger.add_meals(1, 2).unwrap();
    ledger.add_rice(1, 1).unwrap();
    ledger.add_eggs(1, 4).unwrap();
    ledger.set_eggs(1, 2).unwrap();

    let member = ledger.member(1).unwrap();
    assert_eq!(member.meals, 5);
    assert_eq!(member.rice_count, 1);
    assert_eq!(member.egg_count, 2);
    assert_eq!(member.count(Counter::Eggs), 2);
}

#[test]
fn set_meals_is_idempotent() {
    let mut ledger = Ledger::builder().build().unwrap();
    ledger.add_meals(2, 9).unwrap();

    ledger.set_meals(2, 4).unwrap();
    let once = ledger.member(2).unwrap().clone();
    ledger.set_meals(2, 4).unwrap();

    assert_eq!(ledger.member(2).unwrap(), &once);
    assert_eq!(once.meals, 4);
}

#[test]
fn payments_add_up_and_total_is_clamped() {
    let mut ledger = Ledger::builder().build().unwrap();

    ledger.add_payment(1, Money::new(500.0)).unwrap();
    ledger.add_payment(1, Money::new(250.5)).unwrap();
    assert_eq!(ledger.member(1).unwrap().payments, Money::new(750.5));

    ledger.set_payment_total(1, Money::new(300.0)).unwrap();
    assert_eq!(ledger.member(1).unwrap().payments, Money::new(300.0));

    ledger.set_payment_total(1, Money::new(-10.0)).unwrap();
    assert_eq!(ledger.member(1).unwrap().payments, Money::ZERO);
}

#[test]
fn toggle_and_rename() {
    let mut ledger = Ledger::builder().build().unwrap();

    assert!(!ledger.toggle_active(2).unwrap());
    assert!(ledger.toggle_active(2).unwrap());
    ledger.update_name(2, "Karim").unwrap();

    assert_eq!(ledger.member(2).unwrap().name, "Karim");
    assert!(matches!(
        ledger.update_name(2, ""),
        Err(EngineError::InvalidName(_))
    ));
}

#[test]
fn expenses_are_dated_today_and_get_unique_ids() {
    let mut ledger = Ledger::builder().build().unwrap();

    let first = ledger.add_expense("Rice sack", Money::new(1200.0)).unwrap();
    let second = ledger.add_expense("Vegetables", Money::new(300.0)).unwrap();

    assert!(second > first);
    let expense = ledger.expense(first).unwrap();
    assert_eq!(expense.date, ledger.today());
    assert_eq!(expense.description, "Rice sack");
}

#[test]
fn update_and_delete_expense() {
    let mut ledger = Ledger::builder().build().unwrap();
    let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let id = ledger
        .add_expense_on("Fish", Money::new(400.0), date)
        .unwrap();

    ledger.update_expense(id, "Fish and oil", Money::new(520.0)).unwrap();
    let expense = ledger.expense(id).unwrap();
    assert_eq!(expense.description, "Fish and oil");
    assert_eq!(expense.amount, Money::new(520.0));
    assert_eq!(expense.date, date);

    let removed = ledger.delete_expense(id).unwrap();
    assert_eq!(removed.id, id);
    assert!(ledger.expenses().is_empty());
}

#[test]
fn clear_all_empties_collections_but_keeps_prices() {
    let storage = MemoryStorage::new();
    let mut ledger = ledger_with(&storage);
    ledger.set_prices(Prices::new(Money::new(25.0), Money::new(12.0))).unwrap();
    ledger.add_expense("Gas", Money::new(900.0)).unwrap();

    ledger.clear_all().unwrap();

    assert!(ledger.members().is_empty());
    assert!(ledger.expenses().is_empty());
    assert_eq!(ledger.prices().rice, Money::new(25.0));

    // An empty snapshot is not the same as no snapshot: no reseeding.
    let reloaded = ledger_with(&storage);
    assert!(reloaded.members().is_empty());
}

#[test]
fn every_mutation_bumps_the_version() {
    let mut ledger = Ledger::builder().build().unwrap();
    assert_eq!(ledger.version(), 0);
    ledger.add_meals(1, 1).unwrap();
    ledger.add_expense("Salt", Money::new(30.0)).unwrap();
    ledger.set_prices(Prices::default()).unwrap();
    assert_eq!(ledger.version(), 3);
}

#[test]
fn mutation_writes_only_the_changed_collection() {
    let storage = MemoryStorage::new();
    let mut ledger = ledger_with(&storage);

    ledger.add_meals(1, 2).unwrap();
    assert!(storage.get("members").is_some());
    assert!(storage.get("expenses").is_none());

    ledger.add_expense("Oil", Money::new(180.0)).unwrap();
    assert!(storage.get("expenses").is_some());
}

#[test]
fn snapshot_round_trip_reproduces_collections() {
    let storage = MemoryStorage::new();
    let mut ledger = ledger_with(&storage);
    ledger.add_meals(1, 10).unwrap();
    ledger.add_rice(1, 2).unwrap();
    ledger.add_payment(2, Money::new(333.33)).unwrap();
    ledger.toggle_active(3).unwrap();
    ledger.add_member("Newcomer").unwrap();
    ledger.add_expense("Bazar", Money::new(1234.56)).unwrap();
    ledger.set_prices(Prices::new(Money::new(22.5), Money::new(14.0))).unwrap();

    let reloaded = ledger_with(&storage);

    assert_eq!(reloaded.members(), ledger.members());
    assert_eq!(reloaded.expenses(), ledger.expenses());
    assert_eq!(reloaded.prices(), ledger.prices());
}

#[test]
fn snapshot_uses_flat_camel_case_records() {
    let storage = MemoryStorage::new();
    let mut ledger = ledger_with(&storage);
    ledger.add_eggs(1, 1).unwrap();

    let raw = storage.get(SnapshotKey::Members.as_str()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let first = &value[0];
    assert_eq!(first["id"], 1);
    assert_eq!(first["eggCount"], 1);
    assert_eq!(first["riceCount"], 0);
    assert_eq!(first["isActive"], true);
}

#[test]
fn corrupted_snapshot_is_an_error() {
    let storage = MemoryStorage::new();
    storage.insert("expenses", "{not json");
    let err = Ledger::builder().storage(storage).build().unwrap_err();
    assert!(matches!(err, EngineError::Serialization(_)));
}

#[test]
fn failed_write_keeps_last_persisted_state() {
    let mut ledger = Ledger::builder()
        .storage(ReadOnlyStorage::default())
        .build()
        .unwrap();

    let err = ledger.add_meals(1, 5).unwrap_err();

    assert!(matches!(err, EngineError::Storage(_)));
    assert_eq!(ledger.member(1).unwrap().meals, 0);
    assert_eq!(ledger.version(), 0);
    assert!(ledger.clear_all().is_err());
    assert_eq!(ledger.members().len(), 5);
}

#[test]
fn failed_expenses_write_rolls_back_clear_all() {
    let storage = MemoryStorage::new();
    let mut ledger = Ledger::builder()
        .storage(FailingKeyStorage {
            inner: storage.clone(),
            failing: "expenses",
        })
        .build()
        .unwrap();
    ledger.add_meals(1, 3).unwrap();
    let version = ledger.version();

    let err = ledger.clear_all().unwrap_err();

    assert!(matches!(err, EngineError::Storage(_)));
    assert_eq!(ledger.members().len(), 5);
    assert_eq!(ledger.member(1).unwrap().meals, 3);
    assert_eq!(ledger.version(), version);

    let reloaded = ledger_with(&storage);
    assert_eq!(reloaded.members(), ledger.members());
    assert_eq!(reloaded.member(1).unwrap().meals, 3);
}

#[test]
fn negative_payment_never_drops_total_below_zero() {
    let (mut ledger, _) = empty_ledger();
    let id = ledger.add_member("Rafi").unwrap();
    ledger.add_payment(id, Money::new(200.0)).unwrap();

    ledger.add_payment(id, Money::new(-50.0)).unwrap();
    assert_eq!(ledger.member(id).unwrap().payments, Money::new(150.0));

    ledger.add_payment(id, Money::new(-500.0)).unwrap();
    assert_eq!(ledger.member(id).unwrap().payments, Money::ZERO);
}

#[test]
fn overflowing_payment_is_rejected_and_snapshot_stays_loadable() {
    let storage = MemoryStorage::new();
    let mut ledger = ledger_with(&storage);
    ledger.add_payment(2, Money::new(1.7e308)).unwrap();
    let version = ledger.version();

    let err = ledger.add_payment(2, Money::new(1.7e308)).unwrap_err();

    assert!(matches!(err, EngineError::InvalidAmount(_)));
    assert_eq!(ledger.member(2).unwrap().payments, Money::new(1.7e308));
    assert_eq!(ledger.version(), version);
    assert!(!storage.get("members").unwrap().contains("null"));
    let reloaded = ledger_with(&storage);
    assert_eq!(reloaded.member(2).unwrap().payments, Money::new(1.7e308));
}

#[test]
fn non_finite_amounts_are_rejected() {
    let (mut ledger, storage) = empty_ledger();
    let id = ledger.add_member("Nila").unwrap();

    for amount in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let amount = Money::new(amount);
        assert!(matches!(
            ledger.add_payment(id, amount),
            Err(EngineError::InvalidAmount(_))
        ));
        assert!(matches!(
            ledger.set_payment_total(id, amount),
            Err(EngineError::InvalidAmount(_))
        ));
        assert!(matches!(
            ledger.add_expense("Fish", amount),
            Err(EngineError::InvalidAmount(_))
        ));
        assert!(matches!(
            ledger.set_prices(Prices::new(amount, Money::new(15.0))),
            Err(EngineError::InvalidAmount(_))
        ));
    }

    assert_eq!(ledger.member(id).unwrap().payments, Money::ZERO);
    assert!(ledger.expenses().is_empty());
    assert_eq!(ledger.prices(), Prices::default());
    assert_eq!(ledger_with(&storage).members().len(), 1);
}

#[test]
fn default_prices_apply_only_without_stored_prices() {
    let custom = Prices::new(Money::new(30.0), Money::new(18.0));
    let storage = MemoryStorage::new();

    let ledger = Ledger::builder()
        .storage(storage.clone())
        .default_prices(custom)
        .build()
        .unwrap();
    assert_eq!(ledger.prices(), custom);

    storage.insert("prices", r#"{"rice":21.0,"egg":16.0}"#);
    let ledger = Ledger::builder()
        .storage(storage)
        .default_prices(custom)
        .build()
        .unwrap();
    assert_eq!(ledger.prices(), Prices::new(Money::new(21.0), Money::new(16.0)));
}

#[test]
fn file_storage_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let mut ledger = Ledger::builder()
        .storage(FileStorage::new(dir.path()))
        .build()
        .unwrap();
    ledger.add_meals(4, 7).unwrap();
    ledger.add_expense("Cook salary", Money::new(3000.0)).unwrap();

    let reloaded = Ledger::builder()
        .storage(FileStorage::new(dir.path()))
        .build()
        .unwrap();

    assert_eq!(reloaded.member(4).unwrap().meals, 7);
    assert_eq!(reloaded.expenses(), ledger.expenses());
    assert!(dir.path().join("members.json").is_file());
    assert!(dir.path().join("expenses.json").is_file());
}
