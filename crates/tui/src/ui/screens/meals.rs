use engine::{Counter, Member};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, TableState},
};

use crate::{
    app::{AppState, MealsState},
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

    render_totals(frame, layout[0], state, theme);
    render_tracker(frame, layout[1], state, theme);
}

fn render_totals(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let summary = state.summary();
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(area);

    StatCard::new("Total Meals", summary.total_meals.to_string(), theme)
        .caption(format!("{} per meal", summary.meal_rate))
        .render(frame, cols[0]);
    StatCard::new("Total Rice", summary.total_rice.to_string(), theme)
        .caption(format!("{} each", summary.prices.rice))
        .render(frame, cols[1]);
    StatCard::new("Total Eggs", summary.total_eggs.to_string(), theme)
        .caption(format!("{} each", summary.prices.egg))
        .render(frame, cols[2]);
}

fn render_tracker(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let members = state.ledger.members();
    let hint = format!("{} members", members.len());
    let card = Card::new("Daily tracker", theme).focused(true).hint(&hint);

    if members.is_empty() {
        card.render_with(
            frame,
            area,
            Paragraph::new(Span::styled(
                "No members. Press a to add one.",
                Style::default().fg(theme.text_muted),
            )),
        );
        return;
    }

    let header = Row::new(
        ["ID", "Name", "Status"]
            .into_iter()
            .map(|label| Cell::from(label).style(Style::default().fg(theme.text_muted)))
            .chain(Counter::ALL.into_iter().map(|counter| {
                header_cell(counter, state.meals.counter == counter, theme)
            })),
    );

    let rows: Vec<Row> = members
        .iter()
        .map(|member| member_row(member, &state.meals, theme))
        .collect();

    let widths = [
        Constraint::Length(5),
        Constraint::Min(12),
        Constraint::Length(9),
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Length(12),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .row_highlight_style(Style::default().bg(theme.selection))
        .highlight_symbol("» ");

    let inner = card.inner(area);
    frame.render_widget(card.block(), area);
    let mut table_state =
        TableState::default().with_selected(state.meals.cursor.selected(members.len()));
    frame.render_stateful_widget(table, inner, &mut table_state);
}

fn header_cell(counter: Counter, focused: bool, theme: &Theme) -> Cell<'static> {
    let style = if focused {
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    } else {
        Style::default().fg(theme.text_muted)
    };
    Cell::from(counter.label()).style(style)
}

/// `total` plus the pending stepper value, e.g. `12  +3`.
fn counter_cell(member: &Member, counter: Counter, meals: &MealsState, theme: &Theme) -> Cell<'static> {
    let pending = meals.pending(member.id, counter);
    let mut spans = vec![Span::raw(format!("{:>4}", member.count(counter)))];
    if pending > 0 {
        spans.push(Span::styled(
            format!("  +{pending}"),
            Style::default()
                .fg(theme.positive)
                .add_modifier(Modifier::BOLD),
        ));
    }
    Cell::from(Line::from(spans))
}

fn member_row(member: &Member, meals: &MealsState, theme: &Theme) -> Row<'static> {
    let (status, style) = if member.is_active {
        ("active", Style::default().fg(theme.text))
    } else {
        ("inactive", Style::default().fg(theme.text_muted))
    };

    let mut cells = vec![
        Cell::from(format!("#{}", member.id)),
        Cell::from(member.name.clone()),
        Cell::from(status),
    ];
    cells.extend(
        Counter::ALL
            .into_iter()
            .map(|counter| counter_cell(member, counter, meals, theme)),
    );
    Row::new(cells).style(style)
}
