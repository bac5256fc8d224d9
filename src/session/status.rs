use std::io;

use crate::ui::surface::{Position, Surface, TextStyle};

/// Columns between two status fields.
pub const FIELD_GAP: u16 = 3;

/// Values shown on the status bar for one second of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub elapsed_seconds: u64,
    pub live_word_count: u64,
    pub wpm: u64,
}

impl StatusSnapshot {
    /// Words per minute is 0 for a session younger than one second.
    pub fn new(elapsed_seconds: u64, live_word_count: u64) -> Self {
        let wpm = if elapsed_seconds == 0 {
            0
        } else {
            live_word_count * 60 / elapsed_seconds
        };
        Self {
            elapsed_seconds,
            live_word_count,
            wpm,
        }
    }

    /// Field texts, rightmost first.
    pub fn fields(&self) -> [String; 3] {
        let words = if self.live_word_count == 1 {
            "1 word".to_string()
        } else {
            format!("{} words", self.live_word_count)
        };
        [
            format_elapsed(self.elapsed_seconds),
            words,
            format!("{} wpm", self.wpm),
        ]
    }
}

/// `MM:SS`, or `H:MM:SS` past the hour.
pub fn format_elapsed(seconds: u64) -> String {
    let (hours, minutes, secs) = (seconds / 3600, (seconds % 3600) / 60, seconds % 60);
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}

/// Single-row status bar, fields stacked from the right edge leftwards.
pub struct StatusLine {
    row: u16,
    right_margin: u16,
    brightness: u8,
    last: Option<StatusSnapshot>,
}

impl StatusLine {
    pub fn new(row: u16, right_margin: u16, brightness: u8) -> Self {
        Self {
            row,
            right_margin,
            brightness,
            last: None,
        }
    }

    /// Last snapshot drawn.
    pub fn snapshot(&self) -> Option<StatusSnapshot> {
        self.last
    }

    /// Force the next [`update`](Self::update) to redraw.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Redraw when the elapsed second changed since the last draw.
    ///
    /// Returns whether anything was drawn.
    pub fn update(
        &mut self,
        elapsed_seconds: u64,
        live_word_count: u64,
        surface: &mut dyn Surface,
    ) -> io::Result<bool> {
        if self
            .last
            .is_some_and(|last| last.elapsed_seconds == elapsed_seconds)
        {
            return Ok(false);
        }
        self.draw(StatusSnapshot::new(elapsed_seconds, live_word_count), surface)?;
        Ok(true)
    }

    /// Clear the row, paint every field that fits, put the cursor back.
    pub fn draw(&mut self, snapshot: StatusSnapshot, surface: &mut dyn Surface) -> io::Result<()> {
        let cursor = surface.cursor();
        surface.clear_row(self.row)?;

        let style = TextStyle::Status(self.brightness);
        let mut right = surface.size().cols.saturating_sub(self.right_margin);
        for field in snapshot.fields() {
            let width = field.chars().count() as u16;
            let Some(start) = right.checked_sub(width) else {
                break;
            };
            surface.write(&field, Position::new(self.row, start), style)?;
            right = start.saturating_sub(FIELD_GAP);
            if right == 0 {
                break;
            }
        }

        self.last = Some(snapshot);
        surface.set_cursor(cursor)
    }
}
