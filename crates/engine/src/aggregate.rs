//! Pure computations over a ledger snapshot.
//!
//! Nothing here mutates or caches: every call walks the full collections,
//! which hold tens of items at most.
//!
//! The meal rate spreads the shared ("base") expenses over the meals eaten by
//! active members. Rice and eggs are billed per unit to whoever took them, so
//! their cost is carved out of the expenses first:
//!
//! ```text
//! base      = total_expenses - total_rice * rice_price - total_eggs * egg_price
//! meal_rate = base / total_meals            (0 when nobody ate)
//! balance   = payments - (meals * meal_rate + rice * rice_price + eggs * egg_price)
//! ```

use std::cmp::Reverse;

use crate::{Expense, Member, MemberId, Money, Prices};

/// Meals eaten by active members.
pub fn total_meals(members: &[Member]) -> u64 {
    active(members).map(|member| u64::from(member.meals)).sum()
}

/// Rice units taken by active members.
pub fn total_rice(members: &[Member]) -> u64 {
    active(members).map(|member| u64::from(member.rice_count)).sum()
}

/// Egg units taken by active members.
pub fn total_eggs(members: &[Member]) -> u64 {
    active(members).map(|member| u64::from(member.egg_count)).sum()
}

/// Payments of every member, active or not.
pub fn total_payments(members: &[Member]) -> Money {
    members.iter().map(|member| member.payments).sum()
}

pub fn total_expenses(expenses: &[Expense]) -> Money {
    expenses.iter().map(|expense| expense.amount).sum()
}

/// Cost per meal, or zero when no meal was eaten.
pub fn meal_rate(base_expenses: Money, total_meals: u64) -> Money {
    if total_meals == 0 {
        return Money::ZERO;
    }
    base_expenses / total_meals
}

fn active(members: &[Member]) -> impl Iterator<Item = &Member> {
    members.iter().filter(|member| member.is_active)
}

/// Whether a balance is in the member's favour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Standing {
    /// Paid at least the computed cost.
    Credit,
    /// Owes money to the mess.
    Debit,
}

impl Standing {
    pub fn of(balance: Money) -> Self {
        if balance.is_negative() {
            Standing::Debit
        } else {
            Standing::Credit
        }
    }

    /// Register abbreviation: `Cr` or `Dr`.
    pub const fn abbreviation(self) -> &'static str {
        match self {
            Standing::Credit => "Cr",
            Standing::Debit => "Dr",
        }
    }
}

/// Whether the fund holds more than it spent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GroupStanding {
    Surplus,
    Deficit,
}

impl GroupStanding {
    pub fn of(balance: Money) -> Self {
        if balance.is_negative() {
            GroupStanding::Deficit
        } else {
            GroupStanding::Surplus
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            GroupStanding::Surplus => "surplus",
            GroupStanding::Deficit => "deficit",
        }
    }
}

/// Per-member cost breakdown.
///
/// Always computed from the member's own counters, active or not.
#[derive(Clone, Debug, PartialEq)]
pub struct MemberStatement {
    pub member_id: MemberId,
    pub name: String,
    pub is_active: bool,
    pub meals: u32,
    pub rice_count: u32,
    pub egg_count: u32,
    pub meal_cost: Money,
    pub extra_cost: Money,
    pub total_cost: Money,
    pub paid: Money,
    /// `paid - total_cost`: positive is credit, negative is debit.
    pub balance: Money,
}

impl MemberStatement {
    pub fn compute(member: &Member, meal_rate: Money, prices: Prices) -> Self {
        let meal_cost = meal_rate * u64::from(member.meals);
        let extra_cost =
            prices.rice * u64::from(member.rice_count) + prices.egg * u64::from(member.egg_count);
        let total_cost = meal_cost + extra_cost;
        Self {
            member_id: member.id,
            name: member.name.clone(),
            is_active: member.is_active,
            meals: member.meals,
            rice_count: member.rice_count,
            egg_count: member.egg_count,
            meal_cost,
            extra_cost,
            total_cost,
            paid: member.payments,
            balance: member.payments - total_cost,
        }
    }

    pub fn standing(&self) -> Standing {
        Standing::of(self.balance)
    }
}

/// Every derived figure of a snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct Summary {
    pub prices: Prices,
    pub total_meals: u64,
    pub total_rice: u64,
    pub total_eggs: u64,
    pub total_payments: Money,
    pub total_expenses: Money,
    pub rice_cost: Money,
    pub egg_cost: Money,
    /// Expenses left after carving out rice and egg costs. Not clamped: it
    /// goes negative when extras cost more than was spent.
    pub base_expenses: Money,
    pub meal_rate: Money,
    /// `total_payments - total_expenses`.
    ///
    /// This is a cash view of the fund and is independent of the member
    /// balances: their sum differs from it whenever inactive members carry
    /// counters, because those counters are billed on their statements but
    /// excluded from the totals behind the meal rate.
    pub group_balance: Money,
    /// One statement per member, in ledger order.
    pub statements: Vec<MemberStatement>,
}

impl Summary {
    pub fn compute(members: &[Member], expenses: &[Expense], prices: Prices) -> Self {
        let total_meals = total_meals(members);
        let total_rice = total_rice(members);
        let total_eggs = total_eggs(members);
        let total_payments = total_payments(members);
        let total_expenses = total_expenses(expenses);

        let rice_cost = prices.rice * total_rice;
        let egg_cost = prices.egg * total_eggs;
        let base_expenses = total_expenses - rice_cost - egg_cost;
        let meal_rate = meal_rate(base_expenses, total_meals);

        let statements = members
            .iter()
            .map(|member| MemberStatement::compute(member, meal_rate, prices))
            .collect();

        Self {
            prices,
            total_meals,
            total_rice,
            total_eggs,
            total_payments,
            total_expenses,
            rice_cost,
            egg_cost,
            base_expenses,
            meal_rate,
            group_balance: total_payments - total_expenses,
            statements,
        }
    }

    pub fn statement(&self, id: MemberId) -> Option<&MemberStatement> {
        self.statements
            .iter()
            .find(|statement| statement.member_id == id)
    }

    pub fn group_standing(&self) -> GroupStanding {
        GroupStanding::of(self.group_balance)
    }
}

/// Members ranked by meals, most first. Ties keep ledger order.
pub fn meal_distribution(members: &[Member]) -> Vec<&Member> {
    let mut ranked: Vec<&Member> = members.iter().collect();
    ranked.sort_by_key(|member| Reverse(member.meals));
    ranked
}

/// The `limit` most recent expenses, newest date first. Same-day expenses
/// are ordered by id, newest first.
pub fn recent_expenses(expenses: &[Expense], limit: usize) -> Vec<&Expense> {
    let mut recent: Vec<&Expense> = expenses.iter().collect();
    recent.sort_by_key(|expense| Reverse((expense.date, expense.id)));
    recent.truncate(limit);
    recent
}
