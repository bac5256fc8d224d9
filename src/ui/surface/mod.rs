//! Display surface abstraction.
//!
//! The session only ever talks to a [`Surface`]: a grid of character cells
//! with a cursor. `CrosstermSurface` drives the real terminal,
//! `MemorySurface` keeps everything in memory for tests.

mod crossterm_impl;
mod memory_impl;

pub use crossterm_impl::CrosstermSurface;
pub use memory_impl::{Cell, MemorySurface};

use std::io;

/// Screen coordinates, zero based.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: u16,
    pub col: u16,
}

impl Position {
    pub const fn new(row: u16, col: u16) -> Self {
        Self { row, col }
    }
}

/// Surface dimensions in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub cols: u16,
    pub rows: u16,
}

impl Size {
    pub const fn new(cols: u16, rows: u16) -> Self {
        Self { cols, rows }
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }
}

/// How a run of text is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    /// Live text at full brightness.
    Body,
    /// Fading text at a gray level, 255 = full, 0 = invisible.
    Faded(u8),
    /// Status bar text at a gray level.
    Status(u8),
}

/// Capability interface of a character display.
///
/// Writes that fall outside the visible region are dropped silently:
/// redrawing scrolled or resized content must never fail the session.
pub trait Surface {
    /// Paint `text` from `pos` rightwards and leave the cursor after it.
    fn write(&mut self, text: &str, pos: Position, style: TextStyle) -> io::Result<()>;

    /// Blank the whole surface.
    fn clear(&mut self) -> io::Result<()>;

    /// Blank a single row.
    fn clear_row(&mut self, row: u16) -> io::Result<()>;

    fn cursor(&self) -> Position;

    fn set_cursor(&mut self, pos: Position) -> io::Result<()>;

    /// Push pending output to the device.
    fn refresh(&mut self) -> io::Result<()>;

    fn size(&self) -> Size;

    /// Adopt new dimensions after the device was resized.
    fn resize(&mut self, size: Size);
}

/// The part of `text` that fits on screen when written at `pos`.
///
/// Returns `None` when nothing is visible.
pub(crate) fn visible_slice(text: &str, pos: Position, size: Size) -> Option<&str> {
    if !size.contains(pos) {
        return None;
    }
    let room = usize::from(size.cols - pos.col);
    let end = text
        .char_indices()
        .nth(room)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len());
    let visible = &text[..end];
    if visible.is_empty() {
        None
    } else {
        Some(visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visible_slice_truncates_at_right_edge() {
        let size = Size::new(10, 2);
        assert_eq!(visible_slice("abcdef", Position::new(0, 6), size), Some("abcd"));
    }

    #[test]
    fn visible_slice_drops_out_of_bounds() {
        let size = Size::new(10, 2);
        assert_eq!(visible_slice("abc", Position::new(2, 0), size), None);
        assert_eq!(visible_slice("abc", Position::new(0, 10), size), None);
        assert_eq!(visible_slice("", Position::new(0, 0), size), None);
    }

    #[test]
    fn visible_slice_keeps_text_that_fits() {
        let size = Size::new(80, 24);
        assert_eq!(visible_slice("hello", Position::new(3, 4), size), Some("hello"));
    }
}
