use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::Span,
    widgets::{Cell, Paragraph, Row, Table, TableState},
};

use crate::{
    app::AppState,
    ui::{
        components::card::{Card, StatCard},
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(area);

    let summary = state.summary();
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(layout[0]);
    StatCard::new("Total Spent", summary.total_expenses.to_string(), theme)
        .value_style(Style::default().fg(theme.negative))
        .caption(format!("{} entries", state.ledger.expenses().len()))
        .render(frame, cols[0]);
    StatCard::new(
        "Extras",
        (summary.rice_cost + summary.egg_cost).to_string(),
        theme,
    )
    .caption(format!("rice {} · eggs {}", summary.rice_cost, summary.egg_cost))
    .render(frame, cols[1]);
    StatCard::new("Shared by meals", summary.base_expenses.to_string(), theme)
        .caption(format!("{} per meal", summary.meal_rate))
        .render(frame, cols[2]);

    render_table(frame, layout[1], state, theme);
}

fn render_table(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let expenses = state.sorted_expenses();
    let card = Card::new("Expenses", theme).focused(true).hint("newest first");
    if expenses.is_empty() {
        card.render_with(
            frame,
            area,
            Paragraph::new(Span::styled(
                "No expenses yet. Press a to record one.",
                Style::default().fg(theme.text_muted),
            )),
        );
        return;
    }

    let header =
        Row::new(["Date", "Description", "Amount"]).style(Style::default().fg(theme.text_muted));
    let rows: Vec<Row> = expenses
        .iter()
        .map(|expense| {
            Row::new(vec![
                Cell::from(expense.date.format("%Y-%m-%d").to_string()),
                Cell::from(expense.description.clone()),
                Cell::from(format!("{:>14}", expense.amount.to_string())),
            ])
            .style(Style::default().fg(theme.text))
        })
        .collect();

    let widths = [
        Constraint::Length(11),
        Constraint::Min(16),
        Constraint::Length(15),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .row_highlight_style(Style::default().bg(theme.selection))
        .highlight_symbol("» ");

    let inner = card.inner(area);
    frame.render_widget(card.block(), area);
    let mut table_state =
        TableState::default().with_selected(state.expenses.selected(expenses.len()));
    frame.render_stateful_widget(table, inner, &mut table_state);
}
