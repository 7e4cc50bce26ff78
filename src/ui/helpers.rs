//! Shared layout utilities.

use ratatui::layout::Rect;

/// Center a fixed-size rect inside `area`, clamped to fit.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// Mask a password buffer for display.
pub fn masked(len: usize) -> String {
    "*".repeat(len)
}
