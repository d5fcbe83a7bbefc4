use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use crate::{
    app::ConfirmState,
    ui::{components::centered_fixed, theme::Theme},
};

pub fn render(frame: &mut Frame<'_>, area: Rect, confirm: Option<&ConfirmState>, theme: &Theme) {
    let Some(confirm) = confirm else {
        return;
    };
    let popup = centered_fixed(50, 7, area);

    let lines = vec![
        Line::from(Span::styled(
            confirm.message.as_str(),
            Style::default().fg(theme.text),
        )),
        Line::default(),
        Line::from(vec![
            Span::styled(
                "y",
                Style::default()
                    .fg(theme.negative)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" / Enter confirm    "),
            Span::styled("n", Style::default().fg(theme.accent)),
            Span::raw(" / Esc cancel"),
        ]),
    ];

    let block = Block::default()
        .title(Span::styled(" Confirm ", Style::default().fg(theme.warning)))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.warning))
        .style(Style::default().bg(theme.surface));
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block),
        popup,
    );
}
