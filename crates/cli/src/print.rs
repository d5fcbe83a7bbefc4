//! Plain-text tables for the terminal.

use std::fmt::Write;

use engine::{Expense, Member, Prices, Summary};

pub fn members(members: &[Member]) -> String {
    if members.is_empty() {
        return "no members\n".to_string();
    }
    let width = name_width(members.iter().map(|m| m.name.as_str()));
    let mut out = format!(
        "{:>4}  {:<width$}  {:<8}  {:>5}  {:>4}  {:>4}  {:>12}\n",
        "ID", "Name", "Status", "Meals", "Rice", "Eggs", "Paid"
    );
    for member in members {
        let status = if member.is_active { "active" } else { "inactive" };
        let _ = writeln!(
            out,
            "{:>4}  {:<width$}  {:<8}  {:>5}  {:>4}  {:>4}  {:>12}",
            member.id,
            member.name,
            status,
            member.meals,
            member.rice_count,
            member.egg_count,
            member.payments.to_string()
        );
    }
    out
}

pub fn expenses(expenses: &[&Expense]) -> String {
    if expenses.is_empty() {
        return "no expenses\n".to_string();
    }
    let width = name_width(expenses.iter().map(|e| e.description.as_str()));
    let mut out = format!(
        "{:<13}  {:<10}  {:<width$}  {:>12}\n",
        "ID", "Date", "Description", "Amount"
    );
    for expense in expenses {
        let _ = writeln!(
            out,
            "{:<13}  {:<10}  {:<width$}  {:>12}",
            expense.id,
            expense.date.format("%Y-%m-%d").to_string(),
            expense.description,
            expense.amount.to_string()
        );
    }
    out
}

pub fn prices(prices: Prices) -> String {
    format!("rice  {}\negg   {}\n", prices.rice, prices.egg)
}

pub fn summary(summary: &Summary) -> String {
    let mut out = String::new();
    let mut metric = |label: &str, value: String| {
        let _ = writeln!(out, "{label:<16}{value}");
    };
    metric("Total expenses", summary.total_expenses.to_string());
    metric(
        "Rice",
        format!(
            "{} x {} = {}",
            summary.total_rice,
            summary.prices.rice.plain(),
            summary.rice_cost
        ),
    );
    metric(
        "Eggs",
        format!(
            "{} x {} = {}",
            summary.total_eggs,
            summary.prices.egg.plain(),
            summary.egg_cost
        ),
    );
    metric("Base expenses", summary.base_expenses.to_string());
    metric("Total meals", summary.total_meals.to_string());
    metric("Meal rate", format!("{} per meal", summary.meal_rate));
    metric("Total payments", summary.total_payments.to_string());
    metric(
        "Group balance",
        format!(
            "{} ({})",
            summary.group_balance.abs(),
            summary.group_standing().label()
        ),
    );

    if summary.statements.is_empty() {
        return out;
    }

    out.push('\n');
    let width = name_width(summary.statements.iter().map(|s| s.name.as_str()));
    let _ = writeln!(
        out,
        "{:<width$}  {:>5}  {:>4}  {:>4}  {:>10}  {:>8}  {:>10}  {:>10}  {:>12}",
        "Name", "Meals", "Rice", "Eggs", "Meal Cost", "Extra", "Total", "Paid", "Balance"
    );
    for s in &summary.statements {
        let _ = writeln!(
            out,
            "{:<width$}  {:>5}  {:>4}  {:>4}  {:>10}  {:>8}  {:>10}  {:>10}  {:>12}",
            s.name,
            s.meals,
            s.rice_count,
            s.egg_count,
            s.meal_cost.plain(),
            s.extra_cost.plain(),
            s.total_cost.plain(),
            s.paid.plain(),
            format!("{} {}", s.balance.abs().plain(), s.standing().abbreviation()),
        );
    }
    out
}

fn name_width<'a>(names: impl Iterator<Item = &'a str>) -> usize {
    names.map(|name| name.chars().count()).max().unwrap_or(0).max(4)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use engine::{Money, aggregate};

    use super::*;

    fn scenario() -> (Vec<Member>, Vec<Expense>) {
        let mut one = Member::new(1, "Member 1");
        one.meals = 10;
        one.rice_count = 2;
        one.payments = Money::new(400.0);
        let mut two = Member::new(2, "Member 2");
        two.meals = 5;
        two.egg_count = 1;
        two.payments = Money::new(100.0);
        let date = NaiveDate::from_ymd_opt(2024, 5, 31).unwrap();
        let expense = Expense::new(1_717_000_000_000, "Bazar", Money::new(500.0), date);
        (vec![one, two, Member::new(3, "Member 3")], vec![expense])
    }

    #[test]
    fn member_table_lists_status_and_payments() {
        let (mut roster, _) = scenario();
        roster[2].is_active = false;
        let table = members(&roster);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("Status"));
        assert!(lines[1].ends_with("400.00 tk"));
        assert!(lines[3].contains("inactive"));
    }

    #[test]
    fn summary_shows_rate_and_standing() {
        let (roster, spent) = scenario();
        let computed = Summary::compute(&roster, &spent, Prices::default());
        let text = summary(&computed);
        assert!(text.contains("2 x 20.00 = 40.00 tk"));
        assert!(text.contains("29.67 tk per meal"));
        assert!(text.contains("63.33 Cr"));
        assert!(text.contains("63.33 Dr"));
        assert!(text.contains("0.00 tk (surplus)"));
    }

    #[test]
    fn empty_collections_say_so() {
        assert_eq!(members(&[]), "no members\n");
        assert_eq!(expenses(&[]), "no expenses\n");
        let (_, expense_list) = scenario();
        let listed = expenses(&aggregate::recent_expenses(&expense_list, 5));
        assert!(listed.contains("2024-05-31"));
        assert!(listed.contains("Bazar"));
    }
}
