use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::{
    app::{AppState, Section},
    ui::{
        components::{
            centered_rect,
            hints::{GLOBAL, hints_to_spans, section_hints},
        },
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    if !state.help {
        return;
    }

    let popup = centered_rect(70, 70, area);
    let block = Block::default()
        .title(Span::styled(" Keybinds ", Style::default().fg(theme.accent)))
        .title_bottom(Line::from(" Esc close ").right_aligned())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.accent))
        .style(Style::default().bg(theme.surface));

    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(help_lines(state, theme)).block(block), popup);
}

fn help_lines(state: &AppState, theme: &Theme) -> Vec<Line<'static>> {
    let heading = |text: &'static str| {
        Line::from(Span::styled(
            text,
            Style::default()
                .fg(theme.text)
                .add_modifier(Modifier::BOLD),
        ))
    };

    let mut lines = vec![heading("Everywhere"), Line::from(hints_to_spans(&GLOBAL, theme))];

    // The current screen first, then the rest for reference.
    let mut sections = vec![state.section];
    sections.extend(Section::ALL.into_iter().filter(|s| *s != state.section));
    for section in sections {
        let hints = section_hints(section);
        if hints.is_empty() {
            continue;
        }
        lines.push(Line::default());
        lines.push(heading(section.label()));
        for chunk in hints.chunks(4) {
            lines.push(Line::from(hints_to_spans(chunk, theme)));
        }
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "Forms: Tab/↑/↓ move between fields, Enter saves, Esc cancels.",
        Style::default().fg(theme.text_muted),
    )));
    lines.push(Line::from(Span::styled(
        "Numbers that do not parse count as zero.",
        Style::default().fg(theme.text_muted),
    )));

    lines
}
