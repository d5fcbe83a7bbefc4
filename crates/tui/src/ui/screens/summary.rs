use engine::Summary;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table},
};

use crate::{
    app::AppState,
    ui::{
        components::{
            card::Card,
            money::{styled_balance, styled_group_balance},
        },
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let summary = state.summary();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(11), Constraint::Min(0)])
        .split(area);

    Card::new("Breakdown", theme)
        .hint("x export")
        .render_with(frame, layout[0], Paragraph::new(breakdown_lines(summary, theme)));
    render_statements(frame, layout[1], summary, theme);
}

fn breakdown_lines(summary: &Summary, theme: &Theme) -> Vec<Line<'static>> {
    let row = |label: &str, value: Span<'static>| {
        Line::from(vec![
            Span::styled(format!("{label:<18}"), Style::default().fg(theme.text_muted)),
            value,
        ])
    };
    let plain = |text: String| Span::styled(text, Style::default().fg(theme.text));

    vec![
        row("Total expenses", plain(summary.total_expenses.to_string())),
        row(
            "Rice",
            plain(format!(
                "{} × {} = {}",
                summary.total_rice,
                summary.prices.rice.plain(),
                summary.rice_cost
            )),
        ),
        row(
            "Eggs",
            plain(format!(
                "{} × {} = {}",
                summary.total_eggs,
                summary.prices.egg.plain(),
                summary.egg_cost
            )),
        ),
        row("Shared by meals", plain(summary.base_expenses.to_string())),
        row("Total meals", plain(summary.total_meals.to_string())),
        row(
            "Meal rate",
            Span::styled(
                format!("{} per meal", summary.meal_rate),
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
        ),
        row("Total payments", plain(summary.total_payments.to_string())),
        row("Group balance", styled_group_balance(summary.group_balance, theme)),
    ]
}

fn render_statements(frame: &mut Frame<'_>, area: Rect, summary: &Summary, theme: &Theme) {
    let header = Row::new([
        "Name",
        "Meals",
        "Rice",
        "Eggs",
        "Meal Cost",
        "Extra",
        "Total",
        "Paid",
        "Balance",
    ])
    .style(Style::default().fg(theme.text_muted));

    let right = |text: String| Cell::from(Line::from(text).right_aligned());
    let rows: Vec<Row> = summary
        .statements
        .iter()
        .map(|statement| {
            let style = if statement.is_active {
                Style::default().fg(theme.text)
            } else {
                Style::default().fg(theme.text_muted)
            };
            Row::new(vec![
                Cell::from(statement.name.clone()),
                right(statement.meals.to_string()),
                right(statement.rice_count.to_string()),
                right(statement.egg_count.to_string()),
                right(statement.meal_cost.plain()),
                right(statement.extra_cost.plain()),
                right(statement.total_cost.plain()),
                right(statement.paid.plain()),
                Cell::from(Line::from(styled_balance(statement.balance, theme)).right_aligned()),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Min(12),
        Constraint::Length(6),
        Constraint::Length(5),
        Constraint::Length(5),
        Constraint::Length(10),
        Constraint::Length(9),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(13),
    ];
    let card = Card::new("Member balances", theme);
    let table = Table::new(rows, widths).header(header).column_spacing(1);
    card.render_with(frame, area, table);
}
