pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{AppState, Section};

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

use components::hints;

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let theme = Theme::default();
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Info bar
            Constraint::Length(2), // Tab bar (label + underline)
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Bottom bar
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, &theme);
    components::tabs::render_tabs(frame, layout[1], state.section, &theme);

    let content = layout[2];
    match state.section {
        Section::Dashboard => screens::dashboard::render(frame, content, state, &theme),
        Section::Meals => screens::meals::render(frame, content, state, &theme),
        Section::Payments => screens::payments::render(frame, content, state, &theme),
        Section::Expenses => screens::expenses::render(frame, content, state, &theme),
        Section::Summary => screens::summary::render(frame, content, state, &theme),
        Section::Settings => screens::settings::render(frame, content, state, &theme),
    }

    render_bottom_bar(frame, layout[3], state, &theme);
    components::help_overlay::render(frame, area, state, &theme);
    components::form::render(frame, area, state.form.as_ref(), &theme);
    components::confirm::render(frame, area, state.confirm.as_ref(), &theme);
    components::toast::render(frame, area, state.toast.as_ref(), &theme);
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let members = state.ledger.members();
    let active = members.iter().filter(|member| member.is_active).count();
    let muted = Style::default().fg(theme.text_muted);

    let line = Line::from(vec![
        Span::styled(
            " messbook  ",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("Data", muted),
        Span::raw(format!(": {}  ", state.data_dir)),
        Span::styled("Members", muted),
        Span::raw(format!(": {} ({active} active)  ", members.len())),
        Span::styled("Meal rate", muted),
        Span::raw(format!(": {}  ", state.summary().meal_rate)),
        Span::styled("Today", muted),
        Span::raw(format!(": {}", state.ledger.today().format("%Y-%m-%d"))),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let mut parts = vec![Span::raw(" ")];
    let context = hints::section_hints(state.section);
    if !context.is_empty() {
        parts.extend(hints::hints_to_spans(context, theme));
        parts.push(hints::hint_separator(theme));
    }
    parts.extend(hints::hints_to_spans(&hints::GLOBAL, theme));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}
