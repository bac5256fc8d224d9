//! The interactive writing session.
//!
//! One [`Session`] owns everything a run touches: the display surface, the
//! input source, the clock, the output file and the live counters. The
//! loop is single threaded: each [`Session::step`] polls once with a bounded
//! wait, applies the event, and refreshes the status bar.

mod clock;
mod fade;
mod sink;
mod status;
mod view;
mod words;

pub use clock::{Clock, ManualClock, SystemClock};
pub use fade::{fade_level, CapturedChar, FadeModel, FadeSettings, FadeState, FadeTick};
pub use sink::{OutputSink, SinkError};
pub use status::{format_elapsed, StatusLine, StatusSnapshot, FIELD_GAP};
pub use view::{GridPos, Viewport};
pub use words::WordCounter;

use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use thiserror::Error;

use crate::config::{Config, LayoutConfig};
use crate::ui::input::{InputEvent, InputSource};
use crate::ui::layout::{body_rect, STATUS_ROW};
use crate::ui::surface::{Size, Surface};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Terminal I/O failed: {0}")]
    Terminal(#[from] io::Error),

    #[error(transparent)]
    Sink(#[from] SinkError),
}

/// How a key code is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyClass {
    Space,
    Newline,
    Printable(char),
    Ignored,
}

/// Space, either line ending, printable ASCII; everything else is ignored.
pub fn classify(code: u32) -> KeyClass {
    match code {
        0x20 => KeyClass::Space,
        0x0a | 0x0d => KeyClass::Newline,
        0x21..=0x7e => KeyClass::Printable(char::from(code as u8)),
        _ => KeyClass::Ignored,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Quit,
    Interrupted,
}

/// Outcome of one loop iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Continue,
    Stopped(StopReason),
}

/// What a finished session hands to the finalize pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport {
    pub path: PathBuf,
    pub elapsed: Duration,
    pub live_word_count: u64,
    pub stop_reason: StopReason,
}

pub struct Session<S: Surface, I: InputSource> {
    surface: S,
    input: I,
    clock: Box<dyn Clock>,
    sink: OutputSink,
    layout: LayoutConfig,
    poll_interval: Duration,
    start_time: Instant,
    running: bool,
    stop_reason: Option<StopReason>,
    words: WordCounter,
    fade: FadeModel,
    status: StatusLine,
    viewport: Viewport,
    cursor: GridPos,
}

impl<S: Surface, I: InputSource> Session<S, I> {
    /// Build the session and paint the empty screen.
    pub fn new(
        surface: S,
        input: I,
        clock: impl Clock + 'static,
        config: &Config,
        sink: OutputSink,
    ) -> Result<Self, SessionError> {
        let start_time = clock.now();
        let viewport = Viewport::new(body_rect(surface.size(), &config.layout));
        let mut session = Self {
            surface,
            input,
            clock: Box::new(clock),
            sink,
            layout: config.layout.clone(),
            poll_interval: config.writer.poll_interval(),
            start_time,
            running: true,
            stop_reason: None,
            words: WordCounter::new(),
            fade: FadeModel::new(FadeSettings::from(&config.writer), start_time),
            status: StatusLine::new(
                STATUS_ROW,
                config.layout.margin_sides,
                config.writer.stats_brightness,
            ),
            viewport,
            cursor: GridPos::default(),
        };

        session.surface.clear()?;
        session.place_cursor()?;
        session
            .status
            .draw(StatusSnapshot::new(0, 0), &mut session.surface)?;
        session.surface.refresh()?;
        Ok(session)
    }

    /// Drive the loop until quit or interrupt, then close the output file.
    ///
    /// The file is closed on every path, including errors.
    pub fn run(mut self) -> Result<SessionReport, SessionError> {
        tracing::info!(path = %self.sink.path().display(), "session started");
        let outcome = self.drive();
        let closed = self.sink.close();
        let stop_reason = outcome?;
        closed?;

        let report = SessionReport {
            path: self.sink.path().to_path_buf(),
            elapsed: self.elapsed(),
            live_word_count: self.words.count(),
            stop_reason,
        };
        tracing::info!(
            reason = ?report.stop_reason,
            seconds = report.elapsed.as_secs(),
            words = report.live_word_count,
            "session finished"
        );
        Ok(report)
    }

    fn drive(&mut self) -> Result<StopReason, SessionError> {
        loop {
            if let Tick::Stopped(reason) = self.step()? {
                return Ok(reason);
            }
        }
    }

    /// One iteration: poll, apply, refresh the status bar.
    pub fn step(&mut self) -> Result<Tick, SessionError> {
        if let Some(reason) = self.stop_reason {
            return Ok(Tick::Stopped(reason));
        }

        let event = self.input.poll(self.poll_interval)?;
        let now = self.clock.now();
        match event {
            InputEvent::Interrupt => return Ok(self.stop(StopReason::Interrupted)),
            InputEvent::Quit => return Ok(self.stop(StopReason::Quit)),
            InputEvent::Timeout => {
                let outcome = self.fade.tick(now, &mut self.surface, &self.viewport)?;
                if outcome != FadeTick::Idle {
                    tracing::trace!(?outcome, "fade tick");
                }
            }
            InputEvent::Resize(cols, rows) => self.on_resize(Size::new(cols, rows))?,
            InputEvent::Key(code) => self.on_key(code, now)?,
        }

        let elapsed_seconds = now.saturating_duration_since(self.start_time).as_secs();
        self.status
            .update(elapsed_seconds, self.words.count(), &mut self.surface)?;
        self.surface.refresh()?;
        Ok(Tick::Continue)
    }

    fn stop(&mut self, reason: StopReason) -> Tick {
        tracing::debug!(?reason, "session stopping");
        self.running = false;
        self.stop_reason = Some(reason);
        Tick::Stopped(reason)
    }

    fn on_key(&mut self, code: u32, now: Instant) -> Result<(), SessionError> {
        let ch = match classify(code) {
            KeyClass::Ignored => return Ok(()),
            KeyClass::Space => {
                self.words.end_word();
                ' '
            }
            KeyClass::Newline => {
                self.words.end_word();
                '\n'
            }
            KeyClass::Printable(ch) => {
                self.words.start_word();
                ch
            }
        };
        self.commit(ch, now)
    }

    fn commit(&mut self, ch: char, now: Instant) -> Result<(), SessionError> {
        if ch != '\n' && self.cursor.col >= self.viewport.width() {
            self.cursor = GridPos::new(self.cursor.row + 1, 0);
            self.follow_cursor()?;
        }

        self.sink.append(ch)?;
        self.fade
            .record(ch, self.cursor, now, &mut self.surface, &self.viewport)?;

        self.cursor = if ch == '\n' {
            GridPos::new(self.cursor.row + 1, 0)
        } else {
            GridPos::new(self.cursor.row, self.cursor.col + 1)
        };
        self.follow_cursor()?;
        self.place_cursor()?;
        Ok(())
    }

    /// Keep the typing row on screen; scrolling repaints the body.
    fn follow_cursor(&mut self) -> io::Result<()> {
        if self.viewport.follow(self.cursor.row) {
            self.fade.restore(&mut self.surface, &self.viewport)?;
        }
        Ok(())
    }

    fn place_cursor(&mut self) -> io::Result<()> {
        let caret = self.viewport.caret(self.cursor);
        self.surface.set_cursor(caret)
    }

    fn on_resize(&mut self, size: Size) -> io::Result<()> {
        tracing::debug!(cols = size.cols, rows = size.rows, "terminal resized");
        self.surface.resize(size);
        self.viewport.set_body(body_rect(size, &self.layout));
        self.viewport.follow(self.cursor.row);
        self.surface.clear()?;
        self.place_cursor()?;
        self.fade.repaint(&mut self.surface, &self.viewport)?;
        self.status.invalidate();
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn elapsed(&self) -> Duration {
        self.clock.now().saturating_duration_since(self.start_time)
    }

    pub fn live_word_count(&self) -> u64 {
        self.words.count()
    }

    /// Everything typed so far, replayed from the captured characters.
    pub fn captured_text(&self) -> String {
        self.fade.captured_text()
    }

    pub fn captured(&self) -> &[CapturedChar] {
        self.fade.captured()
    }

    pub fn fade_state(&self) -> &FadeState {
        self.fade.state()
    }

    pub fn status_snapshot(&self) -> Option<StatusSnapshot> {
        self.status.snapshot()
    }

    /// Logical position the next character goes to.
    pub fn cursor(&self) -> GridPos {
        self.cursor
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn output_path(&self) -> &Path {
        self.sink.path()
    }
}
