use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, TableState},
};

use crate::{
    app::AppState,
    ui::{
        components::{
            card::{Card, StatCard},
            money::{styled_amount, styled_balance, styled_group_balance},
        },
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
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(layout[0]);
    StatCard::new("Total Collected", summary.total_payments.to_string(), theme)
        .value_style(Style::default().fg(theme.positive))
        .caption("includes inactive members")
        .render(frame, cols[0]);
    Card::new("Group Balance", theme).render_with(
        frame,
        cols[1],
        Paragraph::new(vec![
            Line::from(styled_group_balance(summary.group_balance, theme)),
            Line::from(Span::styled(
                format!("spent {}", summary.total_expenses),
                Style::default().fg(theme.text_muted),
            )),
        ]),
    );

    render_table(frame, layout[1], state, theme);
}

fn render_table(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let members = state.ledger.members();
    let card = Card::new("Payments", theme).focused(true);
    if members.is_empty() {
        card.render_with(
            frame,
            area,
            Paragraph::new(Span::styled(
                "No members to collect from.",
                Style::default().fg(theme.text_muted),
            )),
        );
        return;
    }

    let summary = state.summary();
    let header = Row::new(["ID", "Name", "Paid", "Cost", "Balance"])
        .style(Style::default().fg(theme.text_muted));
    let rows: Vec<Row> = members
        .iter()
        .map(|member| {
            let statement = summary.statement(member.id);
            let cost = statement.map(|s| s.total_cost.to_string()).unwrap_or_default();
            let balance = statement
                .map(|s| Cell::from(styled_balance(s.balance, theme)))
                .unwrap_or_default();
            let style = if member.is_active {
                Style::default().fg(theme.text)
            } else {
                Style::default().fg(theme.text_muted)
            };
            Row::new(vec![
                Cell::from(format!("#{}", member.id)),
                Cell::from(member.name.clone()),
                Cell::from(styled_amount(member.payments, theme)),
                Cell::from(cost),
                balance,
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(5),
        Constraint::Min(12),
        Constraint::Length(14),
        Constraint::Length(14),
        Constraint::Length(14),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .row_highlight_style(Style::default().bg(theme.selection))
        .highlight_symbol("» ");

    let inner = card.inner(area);
    frame.render_widget(card.block(), area);
    let mut table_state =
        TableState::default().with_selected(state.payments.selected(members.len()));
    frame.render_stateful_widget(table, inner, &mut table_state);
}
