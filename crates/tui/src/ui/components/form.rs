use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::{
    app::FormState,
    ui::{components::centered_fixed, theme::Theme},
};

const LABEL_WIDTH: usize = 13;

pub fn render(frame: &mut Frame<'_>, area: Rect, form: Option<&FormState>, theme: &Theme) {
    let Some(form) = form else {
        return;
    };
    // one line per field, a blank, the error or hint, plus borders
    let height = form.fields.len() as u16 + 4;
    let popup = centered_fixed(50, height, area);

    let mut lines: Vec<Line<'_>> = form
        .fields
        .iter()
        .enumerate()
        .map(|(index, field)| {
            let focused = index == form.focus;
            let label_style = if focused {
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text_muted)
            };
            let mut spans = vec![
                Span::styled(format!("{:<width$}", field.label, width = LABEL_WIDTH), label_style),
                Span::styled(field.value.as_str(), Style::default().fg(theme.text)),
            ];
            if focused {
                spans.push(Span::styled("▏", Style::default().fg(theme.accent)));
            }
            Line::from(spans)
        })
        .collect();

    lines.push(Line::default());
    lines.push(match &form.error {
        Some(error) => Line::from(Span::styled(
            error.as_str(),
            Style::default().fg(theme.negative),
        )),
        None => Line::from(Span::styled(
            "Enter save · Tab next field · Esc cancel",
            Style::default().fg(theme.text_muted),
        )),
    });

    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", form.title),
            Style::default().fg(theme.accent),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.surface));
    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}
