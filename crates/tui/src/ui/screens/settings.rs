use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
};

use crate::{
    app::{AppState, SettingsAction},
    ui::{components::card::Card, theme::Theme},
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(0)])
        .split(columns[0]);

    render_prices(frame, left[0], state, theme);
    render_storage(frame, left[1], state, theme);
    render_actions(frame, columns[1], state, theme);
}

fn render_prices(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let prices = state.ledger.prices();
    let line = |label: &'static str, value: String| {
        Line::from(vec![
            Span::styled(label, Style::default().fg(theme.text_muted)),
            Span::styled(value, Style::default().fg(theme.text)),
        ])
    };
    Card::new("Unit prices", theme).render_with(
        frame,
        area,
        Paragraph::new(vec![
            line("Rice  ", format!("{} per unit", prices.rice)),
            line("Egg   ", format!("{} per unit", prices.egg)),
        ]),
    );
}

fn render_storage(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let muted = Style::default().fg(theme.text_muted);
    let lines = vec![
        Line::from(vec![
            Span::styled("Data dir    ", muted),
            Span::raw(state.data_dir.clone()),
        ]),
        Line::from(vec![
            Span::styled("Export dir  ", muted),
            Span::raw(state.export_dir.display().to_string()),
        ]),
        Line::from(vec![
            Span::styled("Timezone    ", muted),
            Span::raw(state.ledger.timezone().name().to_string()),
        ]),
        Line::default(),
        Line::from(Span::styled(
            "Changes are saved as soon as they are made.",
            muted,
        )),
    ];
    Card::new("Storage", theme).render_with(frame, area, Paragraph::new(lines));
}

fn render_actions(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let items: Vec<ListItem> = SettingsAction::ALL
        .into_iter()
        .map(|action| {
            let style = if action == SettingsAction::FactoryReset {
                Style::default().fg(theme.negative)
            } else {
                Style::default().fg(theme.text)
            };
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{}  ", action.shortcut()),
                    Style::default().fg(theme.accent),
                ),
                Span::styled(action.label(), style),
            ]))
        })
        .collect();

    let card = Card::new("Actions", theme).focused(true);
    let list = List::new(items)
        .highlight_style(
            Style::default()
                .bg(theme.selection)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");
    let inner = card.inner(area);
    frame.render_widget(card.block(), area);
    let mut list_state = ListState::default().with_selected(
        state.settings.selected(SettingsAction::ALL.len()),
    );
    frame.render_stateful_widget(list, inner, &mut list_state);
}
