use crate::config::LayoutConfig;
use crate::ui::surface::Size;

/// Rectangle of screen cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

/// Row owned by the status bar.
pub const STATUS_ROW: u16 = 0;

/// The writing body: inside the margins, below the status row.
///
/// Never collapses below a single cell, so tiny terminals still accept text.
pub fn body_rect(size: Size, margins: &LayoutConfig) -> Rect {
    let top = margins.margin_top.max(1).min(size.rows.saturating_sub(1));
    let bottom = margins
        .margin_bottom
        .min(size.rows.saturating_sub(top + 1));
    let sides = margins.margin_sides.min(size.cols.saturating_sub(1) / 2);

    Rect {
        x: sides,
        y: top,
        width: size.cols.saturating_sub(sides * 2).max(1),
        height: size.rows.saturating_sub(top + bottom).max(1),
    }
}
