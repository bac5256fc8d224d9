use std::io;

use super::{visible_slice, Position, Size, Surface, TextStyle};

/// One painted character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: TextStyle,
}

/// In-memory surface used by tests and headless runs.
#[derive(Debug, Clone)]
pub struct MemorySurface {
    size: Size,
    cells: Vec<Option<Cell>>,
    cursor: Position,
    clears: usize,
    refreshes: usize,
}

impl MemorySurface {
    pub fn new(cols: u16, rows: u16) -> Self {
        let size = Size::new(cols, rows);
        Self {
            size,
            cells: vec![None; Self::area(size)],
            cursor: Position::default(),
            clears: 0,
            refreshes: 0,
        }
    }

    fn area(size: Size) -> usize {
        usize::from(size.cols) * usize::from(size.rows)
    }

    fn index(&self, pos: Position) -> usize {
        usize::from(pos.row) * usize::from(self.size.cols) + usize::from(pos.col)
    }

    pub fn cell(&self, pos: Position) -> Option<Cell> {
        if !self.size.contains(pos) {
            return None;
        }
        self.cells[self.index(pos)]
    }

    /// Characters of `row` with blanks for unpainted cells, right-trimmed.
    pub fn row_text(&self, row: u16) -> String {
        if row >= self.size.rows {
            return String::new();
        }
        let text: String = (0..self.size.cols)
            .map(|col| {
                self.cell(Position::new(row, col))
                    .map(|cell| cell.ch)
                    .unwrap_or(' ')
            })
            .collect();
        text.trim_end().to_string()
    }

    /// Every painted cell, row-major.
    pub fn painted(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        let cols = usize::from(self.size.cols.max(1));
        self.cells.iter().enumerate().filter_map(move |(idx, cell)| {
            cell.map(|cell| {
                let pos = Position::new((idx / cols) as u16, (idx % cols) as u16);
                (pos, cell)
            })
        })
    }

    /// Number of full clears so far.
    pub fn clear_count(&self) -> usize {
        self.clears
    }

    pub fn refresh_count(&self) -> usize {
        self.refreshes
    }
}

impl Surface for MemorySurface {
    fn write(&mut self, text: &str, pos: Position, style: TextStyle) -> io::Result<()> {
        let Some(visible) = visible_slice(text, pos, self.size) else {
            return Ok(());
        };
        let mut col = pos.col;
        for ch in visible.chars() {
            let idx = self.index(Position::new(pos.row, col));
            self.cells[idx] = Some(Cell { ch, style });
            col += 1;
        }
        self.cursor = Position::new(pos.row, col.min(self.size.cols.saturating_sub(1)));
        Ok(())
    }

    fn clear(&mut self) -> io::Result<()> {
        self.cells.iter_mut().for_each(|cell| *cell = None);
        self.clears += 1;
        Ok(())
    }

    fn clear_row(&mut self, row: u16) -> io::Result<()> {
        if row >= self.size.rows {
            return Ok(());
        }
        let start = self.index(Position::new(row, 0));
        let end = start + usize::from(self.size.cols);
        self.cells[start..end].iter_mut().for_each(|cell| *cell = None);
        Ok(())
    }

    fn cursor(&self) -> Position {
        self.cursor
    }

    fn set_cursor(&mut self, pos: Position) -> io::Result<()> {
        self.cursor = pos;
        Ok(())
    }

    fn refresh(&mut self) -> io::Result<()> {
        self.refreshes += 1;
        Ok(())
    }

    fn size(&self) -> Size {
        self.size
    }

    fn resize(&mut self, size: Size) {
        self.size = size;
        self.cells = vec![None; Self::area(size)];
        self.cursor = Position::default();
    }
}
