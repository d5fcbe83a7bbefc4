use ratatui::{style::Style, text::Span};

use crate::{app::Section, ui::theme::Theme};

/// A keyboard hint consisting of a key and its action.
#[derive(Debug, Clone, Copy)]
pub struct KeyHint {
    pub key: &'static str,
    pub action: &'static str,
}

const fn hint(key: &'static str, action: &'static str) -> KeyHint {
    KeyHint { key, action }
}

pub const GLOBAL: [KeyHint; 4] = [
    hint("1-6", "section"),
    hint("←/→", "prev/next"),
    hint("?", "help"),
    hint("q", "quit"),
];

const MEALS: [KeyHint; 9] = [
    hint("↑/↓", "member"),
    hint("Tab", "meals/rice/eggs"),
    hint("+/-", "count"),
    hint("Enter", "add"),
    hint("s", "set total"),
    hint("Space", "active"),
    hint("a", "new member"),
    hint("e", "rename"),
    hint("d", "remove"),
];

const PAYMENTS: [KeyHint; 3] = [
    hint("↑/↓", "member"),
    hint("a", "add payment"),
    hint("s", "set total paid"),
];

const EXPENSES: [KeyHint; 4] = [
    hint("↑/↓", "expense"),
    hint("a", "add"),
    hint("e", "edit"),
    hint("d", "delete"),
];

const SUMMARY: [KeyHint; 1] = [hint("x", "export report")];

const SETTINGS: [KeyHint; 5] = [
    hint("↑/↓", "choose"),
    hint("Enter", "run"),
    hint("p", "prices"),
    hint("x", "export"),
    hint("r", "reset"),
];

/// Keys that act on the given screen.
pub fn section_hints(section: Section) -> &'static [KeyHint] {
    match section {
        Section::Dashboard => &[],
        Section::Meals => &MEALS,
        Section::Payments => &PAYMENTS,
        Section::Expenses => &EXPENSES,
        Section::Summary => &SUMMARY,
        Section::Settings => &SETTINGS,
    }
}

pub fn hints_to_spans(hints: &[KeyHint], theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::new();

    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(hint.key, Style::default().fg(theme.accent)));
        spans.push(Span::raw(format!(" {}", hint.action)));
    }

    spans
}

pub fn hint_separator(theme: &Theme) -> Span<'static> {
    Span::styled("  │  ", Style::default().fg(theme.border))
}
