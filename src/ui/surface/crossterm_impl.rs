use crossterm::cursor::MoveTo;
use crossterm::style::{Attribute, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::terminal::{Clear as TermClear, ClearType};
use crossterm::QueueableCommand;
use std::io::{self, Stdout, Write};

use super::{visible_slice, Position, Size, Surface, TextStyle};
use crate::ui::theme::foreground;

/// Surface drawing to a terminal through crossterm commands.
///
/// Commands are queued and only reach the device on [`Surface::refresh`].
/// The cursor position is tracked locally instead of being queried from the
/// terminal on every status redraw.
pub struct CrosstermSurface<W: Write = Stdout> {
    out: W,
    size: Size,
    cursor: Position,
}

impl CrosstermSurface<Stdout> {
    /// Surface over stdout, sized to the current terminal.
    pub fn stdout() -> io::Result<Self> {
        let (cols, rows) = crossterm::terminal::size()?;
        Ok(Self::new(io::stdout(), Size::new(cols, rows)))
    }
}

impl<W: Write> CrosstermSurface<W> {
    pub fn new(out: W, size: Size) -> Self {
        Self {
            out,
            size,
            cursor: Position::default(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Surface for CrosstermSurface<W> {
    fn write(&mut self, text: &str, pos: Position, style: TextStyle) -> io::Result<()> {
        let Some(visible) = visible_slice(text, pos, self.size) else {
            return Ok(());
        };
        self.out.queue(MoveTo(pos.col, pos.row))?;
        if let Some(color) = foreground(style) {
            self.out.queue(SetForegroundColor(color))?;
        }
        if matches!(style, TextStyle::Status(_)) {
            self.out.queue(SetAttribute(Attribute::Dim))?;
        }
        self.out.queue(Print(visible))?;
        self.out.queue(SetAttribute(Attribute::Reset))?;
        self.out.queue(ResetColor)?;

        let written = visible.chars().count() as u16;
        let col = pos.col.saturating_add(written);
        self.cursor = Position::new(pos.row, col.min(self.size.cols.saturating_sub(1)));
        Ok(())
    }

    fn clear(&mut self) -> io::Result<()> {
        self.out.queue(TermClear(ClearType::All))?;
        Ok(())
    }

    fn clear_row(&mut self, row: u16) -> io::Result<()> {
        if row >= self.size.rows {
            return Ok(());
        }
        self.out.queue(MoveTo(0, row))?;
        self.out.queue(TermClear(ClearType::CurrentLine))?;
        Ok(())
    }

    fn cursor(&self) -> Position {
        self.cursor
    }

    fn set_cursor(&mut self, pos: Position) -> io::Result<()> {
        let row = pos.row.min(self.size.rows.saturating_sub(1));
        let col = pos.col.min(self.size.cols.saturating_sub(1));
        self.out.queue(MoveTo(col, row))?;
        self.cursor = Position::new(row, col);
        Ok(())
    }

    fn refresh(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    fn size(&self) -> Size {
        self.size
    }

    fn resize(&mut self, size: Size) {
        self.size = size;
    }
}
