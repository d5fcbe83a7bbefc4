/// Horizontal bar like `████████░░░░` filled by `value / max`.
#[must_use]
pub fn ascii_bar(value: u64, max: u64, width: usize) -> String {
    if max == 0 {
        return "░".repeat(width);
    }

    let ratio = (value as f64 / max as f64).clamp(0.0, 1.0);
    let filled = ((ratio * width as f64).round() as usize).min(width);
    let empty = width - filled;

    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

/// Whole-percent share of `value` in `total`, 0 when the total is 0.
#[must_use]
pub fn share_percent(value: u64, total: u64) -> u16 {
    if total == 0 {
        return 0;
    }
    ((value as f64 / total as f64) * 100.0).round().min(100.0) as u16
}
