use engine::aggregate;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
};

use crate::{
    app::AppState,
    ui::{
        components::{
            card::{Card, StatCard},
            charts::{ascii_bar, share_percent},
            money::styled_group_balance,
        },
        theme::Theme,
    },
};

const RECENT_EXPENSES: usize = 5;

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(area);

    render_stats(frame, layout[0], state, theme);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(layout[1]);
    render_distribution(frame, columns[0], state, theme);
    render_recent_expenses(frame, columns[1], state, theme);
}

fn render_stats(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let summary = state.summary();
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    StatCard::new("Total Meals", summary.total_meals.to_string(), theme)
        .caption(format!(
            "rice {} · eggs {}",
            summary.total_rice, summary.total_eggs
        ))
        .render(frame, cols[0]);
    StatCard::new("Meal Rate", summary.meal_rate.to_string(), theme)
        .value_style(Style::default().fg(theme.accent))
        .caption("per meal")
        .render(frame, cols[1]);
    StatCard::new("Expenses", summary.total_expenses.to_string(), theme)
        .caption(format!("{} entries", state.ledger.expenses().len()))
        .render(frame, cols[2]);

    let group = Card::new("Group Balance", theme);
    group.render_with(
        frame,
        cols[3],
        Paragraph::new(vec![
            Line::from(styled_group_balance(summary.group_balance, theme)),
            Line::from(Span::styled(
                format!("collected {}", summary.total_payments),
                Style::default().fg(theme.text_muted),
            )),
        ]),
    );
}

fn render_distribution(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let summary = state.summary();
    let ranked = aggregate::meal_distribution(state.ledger.members());
    let card = Card::new("Meal distribution", theme);
    let inner = card.inner(area);

    if ranked.is_empty() {
        card.render_with(
            frame,
            area,
            Paragraph::new(Span::styled(
                "No members yet. Add one from the Meals screen (2, then a).",
                Style::default().fg(theme.text_muted),
            )),
        );
        return;
    }

    let max = ranked.first().map_or(0, |member| u64::from(member.meals));
    let name_width = ranked
        .iter()
        .map(|member| member.name.chars().count())
        .max()
        .unwrap_or(0)
        .min(18);
    // name, gap, bar, gap, "999 (100%)"
    let bar_width = (inner.width as usize)
        .saturating_sub(name_width + 14)
        .clamp(4, 30);

    let items: Vec<ListItem> = ranked
        .into_iter()
        .take(inner.height as usize)
        .map(|member| {
            let style = if member.is_active {
                Style::default().fg(theme.text)
            } else {
                Style::default().fg(theme.text_muted)
            };
            let name: String = member.name.chars().take(name_width).collect();
            let meals = u64::from(member.meals);
            ListItem::new(Line::from(vec![
                Span::styled(format!("{name:<name_width$} "), style),
                Span::styled(
                    ascii_bar(meals, max, bar_width),
                    Style::default().fg(theme.accent),
                ),
                Span::styled(
                    format!(
                        " {meals:>3} ({}%)",
                        share_percent(meals, summary.total_meals)
                    ),
                    style,
                ),
            ]))
        })
        .collect();

    card.render_with(frame, area, List::new(items));
}

fn render_recent_expenses(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let recent = aggregate::recent_expenses(state.ledger.expenses(), RECENT_EXPENSES);
    let card = Card::new("Recent expenses", theme);

    if recent.is_empty() {
        card.render_with(
            frame,
            area,
            Paragraph::new(Span::styled(
                "No expenses recorded.",
                Style::default().fg(theme.text_muted),
            )),
        );
        return;
    }

    let items: Vec<ListItem> = recent
        .into_iter()
        .map(|expense| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    expense.date.format("%d %b ").to_string(),
                    Style::default().fg(theme.text_muted),
                ),
                Span::styled(expense.description.clone(), Style::default().fg(theme.text)),
                Span::raw("  "),
                Span::styled(
                    expense.amount.to_string(),
                    Style::default().fg(theme.negative),
                ),
            ]))
        })
        .collect();

    card.render_with(frame, area, List::new(items));
}
