pub mod card;
pub mod charts;
pub mod confirm;
pub mod form;
pub mod help_overlay;
pub mod hints;
pub mod money;
pub mod tabs;
pub mod toast;

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// A rectangle of `percent_x` by `percent_y` centred in `area`.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// A popup of fixed `height` rows, `percent_x` wide, centred in `area`.
pub fn centered_fixed(percent_x: u16, height: u16, area: Rect) -> Rect {
    let height = height.min(area.height);
    let width = area.width * percent_x.min(100) / 100;
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_popup_stays_inside() {
        let area = Rect::new(0, 0, 80, 10);
        let popup = centered_fixed(50, 30, area);
        assert_eq!(popup, Rect::new(20, 0, 40, 10));

        let popup = centered_fixed(50, 4, area);
        assert_eq!(popup, Rect::new(20, 3, 40, 4));
    }
}
