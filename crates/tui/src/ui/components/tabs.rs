use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::{app::Section, ui::theme::Theme};

pub fn render_tabs(frame: &mut Frame<'_>, area: Rect, active: Section, theme: &Theme) {
    let mut spans = vec![Span::raw(" ")];

    for (i, section) in Section::ALL.into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        let shortcut = Span::styled(
            format!("{} ", section.shortcut()),
            Style::default().fg(theme.text_muted),
        );
        if section == active {
            spans.push(shortcut);
            spans.push(Span::styled(
                format!("[{}]", section.label()),
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(shortcut);
            spans.push(Span::styled(
                section.label(),
                Style::default().fg(theme.text),
            ));
        }
    }

    let underline = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(theme.border));
    frame.render_widget(Paragraph::new(Line::from(spans)).block(underline), area);
}
