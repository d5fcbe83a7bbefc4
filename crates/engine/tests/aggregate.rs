use chrono::NaiveDate;

use engine::{
    Expense, GroupStanding, Member, Money, Prices, Standing, Summary,
    aggregate::{self, meal_distribution, recent_expenses},
};

const EPS: f64 = 1e-9;

fn member(id: u32, meals: u32, rice: u32, eggs: u32, paid: f64) -> Member {
    Member {
        meals,
        rice_count: rice,
        egg_count: eggs,
        payments: Money::new(paid),
        ..Member::new(id, format!("Member {id}"))
    }
}

fn expense(id: i64, amount: f64, day: u32) -> Expense {
    Expense::new(
        id,
        format!("expense {id}"),
        Money::new(amount),
        NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
    )
}

fn approx(actual: Money, expected: f64) {
    assert!(
        (actual.value() - expected).abs() < EPS,
        "expected {expected}, got {}",
        actual.value()
    );
}

/// Three active members, rice at 20 and eggs at 15, 500 spent in total.
fn scenario() -> (Vec<Member>, Vec<Expense>) {
    let members = vec![
        member(1, 10, 2, 0, 400.0),
        member(2, 5, 0, 1, 100.0),
        member(3, 0, 0, 0, 0.0),
    ];
    let expenses = vec![expense(1, 300.0, 1), expense(2, 200.0, 2)];
    (members, expenses)
}

#[test]
fn reference_scenario() {
    let (members, expenses) = scenario();
    let summary = Summary::compute(&members, &expenses, Prices::default());

    assert_eq!(summary.total_meals, 15);
    assert_eq!(summary.total_rice, 2);
    assert_eq!(summary.total_eggs, 1);
    approx(summary.total_expenses, 500.0);
    approx(summary.rice_cost, 40.0);
    approx(summary.egg_cost, 15.0);
    approx(summary.base_expenses, 445.0);
    approx(summary.meal_rate, 445.0 / 15.0);
    assert_eq!(summary.meal_rate.plain(), "29.67");

    let first = summary.statement(1).unwrap();
    approx(first.meal_cost, 10.0 * 445.0 / 15.0);
    assert_eq!(first.meal_cost.plain(), "296.67");
    approx(first.extra_cost, 40.0);
    approx(first.total_cost, 10.0 * 445.0 / 15.0 + 40.0);
    assert_eq!(first.total_cost.plain(), "336.67");
    assert_eq!(first.standing(), Standing::Credit);

    let second = summary.statement(2).unwrap();
    approx(second.extra_cost, 15.0);
    assert_eq!(second.standing(), Standing::Debit);

    approx(summary.group_balance, 0.0);
    assert_eq!(summary.group_standing(), GroupStanding::Surplus);
}

#[test]
fn meal_rate_is_zero_without_meals() {
    let members = vec![member(1, 0, 3, 2, 50.0), member(2, 0, 0, 0, 0.0)];
    for total in [0.0, 10.0, 1_000_000.0] {
        let expenses = vec![expense(1, total, 1)];
        let summary = Summary::compute(&members, &expenses, Prices::default());
        assert_eq!(summary.meal_rate, Money::ZERO);
        assert!(summary.meal_rate.value().is_finite());
        assert!(summary.statements.iter().all(|s| s.meal_cost.is_zero()));
    }
}

#[test]
fn payments_include_inactive_members() {
    let mut members = vec![
        member(1, 4, 1, 1, 120.0),
        member(2, 6, 2, 0, 80.5),
        member(3, 8, 0, 3, 45.25),
    ];
    members[1].is_active = false;

    assert_eq!(aggregate::total_payments(&members), Money::new(245.75));
    assert_eq!(aggregate::total_meals(&members), 12);
    assert_eq!(aggregate::total_rice(&members), 1);
    assert_eq!(aggregate::total_eggs(&members), 4);
}

#[test]
fn deactivation_changes_totals_but_not_own_statement() {
    let (mut members, expenses) = scenario();
    let prices = Prices::default();
    let before = Summary::compute(&members, &expenses, prices);

    members[1].is_active = false;
    let after = Summary::compute(&members, &expenses, prices);

    assert_eq!(after.total_meals, 10);
    assert_eq!(after.total_eggs, 0);
    approx(after.total_payments, before.total_payments.value());

    let statement = after.statement(2).unwrap();
    assert!(!statement.is_active);
    approx(statement.extra_cost, 15.0);
    approx(statement.meal_cost, 5.0 * after.meal_rate.value());
    approx(
        statement.balance,
        100.0 - (5.0 * after.meal_rate.value() + 15.0),
    );
}

#[test]
fn balance_formula_holds_for_every_member() {
    let (members, expenses) = scenario();
    let prices = Prices::new(Money::new(22.0), Money::new(13.5));
    let summary = Summary::compute(&members, &expenses, prices);

    for (member, statement) in members.iter().zip(&summary.statements) {
        let expected = member.payments.value()
            - (f64::from(member.meals) * summary.meal_rate.value()
                + f64::from(member.rice_count) * 22.0
                + f64::from(member.egg_count) * 13.5);
        approx(statement.balance, expected);
    }
}

#[test]
fn member_balances_need_not_sum_to_group_balance() {
    let (mut members, expenses) = scenario();
    members[0].is_active = false;
    let summary = Summary::compute(&members, &expenses, Prices::default());

    let net: f64 = summary.statements.iter().map(|s| s.balance.value()).sum();
    approx(summary.group_balance, 0.0);
    assert!((net - summary.group_balance.value()).abs() > 1.0);
}

#[test]
fn base_expenses_can_go_negative() {
    let members = vec![member(1, 2, 10, 0, 0.0)];
    let expenses = vec![expense(1, 100.0, 1)];
    let summary = Summary::compute(&members, &expenses, Prices::default());

    approx(summary.base_expenses, -100.0);
    approx(summary.meal_rate, -50.0);
    assert_eq!(summary.group_standing(), GroupStanding::Deficit);
}

#[test]
fn distribution_ranks_by_meals() {
    let members = vec![
        member(1, 3, 0, 0, 0.0),
        member(2, 9, 0, 0, 0.0),
        member(3, 3, 0, 0, 0.0),
    ];
    let ids: Vec<u32> = meal_distribution(&members).iter().map(|m| m.id).collect();
    assert_eq!(ids, [2, 1, 3]);
}

#[test]
fn recent_expenses_newest_first() {
    let expenses = vec![
        expense(10, 1.0, 3),
        expense(11, 1.0, 9),
        expense(12, 1.0, 3),
        expense(13, 1.0, 1),
    ];
    let ids: Vec<i64> = recent_expenses(&expenses, 3).iter().map(|e| e.id).collect();
    assert_eq!(ids, [11, 12, 10]);
    assert!(recent_expenses(&[], 5).is_empty());
}
