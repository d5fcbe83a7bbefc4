use engine::{GroupStanding, Money, Standing};
use ratatui::{
    style::{Modifier, Style},
    text::Span,
};

use crate::ui::theme::Theme;

/// Balance as the register prints it: magnitude followed by Cr or Dr.
#[must_use]
pub fn balance_label(balance: Money) -> String {
    format!(
        "{} {}",
        balance.abs().plain(),
        Standing::of(balance).abbreviation()
    )
}

/// Credit in green, debit in red.
#[must_use]
pub fn styled_balance(balance: Money, theme: &Theme) -> Span<'static> {
    let color = match Standing::of(balance) {
        Standing::Credit => theme.positive,
        Standing::Debit => theme.negative,
    };
    Span::styled(balance_label(balance), Style::default().fg(color))
}

/// Group balance with its surplus/deficit label, bold.
#[must_use]
pub fn styled_group_balance(balance: Money, theme: &Theme) -> Span<'static> {
    let standing = GroupStanding::of(balance);
    let color = match standing {
        GroupStanding::Surplus => theme.positive,
        GroupStanding::Deficit => theme.negative,
    };
    Span::styled(
        format!("{} ({})", balance.abs(), standing.label()),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )
}

/// Amount with currency suffix; zero is muted.
#[must_use]
pub fn styled_amount(amount: Money, theme: &Theme) -> Span<'static> {
    let color = if amount.is_zero() {
        theme.text_muted
    } else {
        theme.text
    };
    Span::styled(amount.to_string(), Style::default().fg(color))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balances_read_cr_and_dr() {
        assert_eq!(balance_label(Money::new(63.333)), "63.33 Cr");
        assert_eq!(balance_label(Money::new(-63.333)), "63.33 Dr");
        assert_eq!(balance_label(Money::ZERO), "0.00 Cr");
    }
}
