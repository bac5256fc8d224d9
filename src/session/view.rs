use std::io;

use crate::ui::layout::Rect;
use crate::ui::surface::{Position, Surface};

/// Position in the logical text grid, unbounded downwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct GridPos {
    pub row: usize,
    pub col: usize,
}

impl GridPos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Window of the logical grid shown in the body region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    body: Rect,
    scroll: usize,
}

impl Viewport {
    pub fn new(body: Rect) -> Self {
        Self { body, scroll: 0 }
    }

    pub fn width(&self) -> usize {
        usize::from(self.body.width)
    }

    pub fn height(&self) -> usize {
        usize::from(self.body.height)
    }

    /// First logical row currently on screen.
    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn body(&self) -> Rect {
        self.body
    }

    /// Adopt a new body region, keeping the scroll offset.
    pub fn set_body(&mut self, body: Rect) {
        self.body = body;
    }

    /// Screen position of `pos`, or `None` when it is scrolled away or
    /// outside the body.
    pub fn project(&self, pos: GridPos) -> Option<Position> {
        if pos.row < self.scroll || pos.col >= self.width() {
            return None;
        }
        let row = pos.row - self.scroll;
        if row >= self.height() {
            return None;
        }
        Some(Position::new(
            self.body.y + row as u16,
            self.body.x + pos.col as u16,
        ))
    }

    /// Where the terminal cursor goes for a typing position. Unlike
    /// [`project`](Self::project) this never fails: a position past the
    /// right edge sits on the last column until the next character wraps.
    pub fn caret(&self, pos: GridPos) -> Position {
        let row = pos.row.saturating_sub(self.scroll).min(self.height().saturating_sub(1));
        let col = pos.col.min(self.width().saturating_sub(1));
        Position::new(self.body.y + row as u16, self.body.x + col as u16)
    }

    /// Scroll so that `row` is visible. Returns true when the offset moved.
    pub fn follow(&mut self, row: usize) -> bool {
        let height = self.height();
        let scroll = if row < self.scroll {
            row
        } else if row >= self.scroll + height {
            row + 1 - height
        } else {
            return false;
        };
        self.scroll = scroll;
        true
    }

    /// Blank every row of the body region.
    pub fn clear(&self, surface: &mut dyn Surface) -> io::Result<()> {
        for row in self.body.y..self.body.y.saturating_add(self.body.height) {
            surface.clear_row(row)?;
        }
        Ok(())
    }
}
