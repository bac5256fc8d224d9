use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crate::session::ManualClock;

/// Result of one bounded poll of an input source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Nothing arrived within the wait.
    Timeout,
    /// One key, as its character code.
    Key(u32),
    /// Abort requested (Ctrl+C, SIGTERM, ...).
    Interrupt,
    /// The writer asked to finish the session.
    Quit,
    /// The display changed size.
    Resize(u16, u16),
}

/// Something the session loop can poll for input.
pub trait InputSource {
    /// Wait at most `timeout` for the next event.
    fn poll(&mut self, timeout: Duration) -> io::Result<InputEvent>;
}

pub const ENTER: u32 = 0x0d;
const TAB: u32 = 0x09;
const BACKSPACE: u32 = 0x7f;

/// Map a crossterm key to an input event. `None` for events the session
/// never sees (key releases, navigation keys).
pub fn translate_key(key: KeyEvent) -> Option<InputEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if is_ctrl_char(key, 'c') {
        return Some(InputEvent::Interrupt);
    }
    if is_ctrl_char(key, 'd') || matches!(key.code, KeyCode::Esc) {
        return Some(InputEvent::Quit);
    }

    match key.code {
        KeyCode::Enter => Some(InputEvent::Key(ENTER)),
        KeyCode::Tab => Some(InputEvent::Key(TAB)),
        KeyCode::Backspace => Some(InputEvent::Key(BACKSPACE)),
        KeyCode::Char(ch) if key.modifiers.contains(KeyModifiers::CONTROL) => {
            // Control chords are delivered as their control code and end
            // up ignored by the session.
            Some(InputEvent::Key(u32::from(ch) & 0x1f))
        }
        // Alt+key reaches the terminal as ESC then the key, so the key
        // itself still counts.
        KeyCode::Char(ch) => Some(InputEvent::Key(u32::from(ch))),
        _ => None,
    }
}

fn is_ctrl_char(key: KeyEvent, needle: char) -> bool {
    matches!(key.code, KeyCode::Char(ch) if ch.eq_ignore_ascii_case(&needle))
        && key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Replays a fixed list of events, then quits.
///
/// With a [`ManualClock`] attached every `Timeout` advances the clock by the
/// poll wait, so idle stretches can be scripted without sleeping.
pub struct ScriptedInput {
    events: VecDeque<InputEvent>,
    clock: Option<ManualClock>,
}

impl ScriptedInput {
    pub fn new(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
            clock: None,
        }
    }

    /// One key event per character, `'\n'` sent as Enter.
    pub fn typing(text: &str) -> Self {
        Self::new(text.chars().map(|ch| match ch {
            '\n' => InputEvent::Key(ENTER),
            other => InputEvent::Key(u32::from(other)),
        }))
    }

    pub fn with_clock(mut self, clock: ManualClock) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Queue `count` idle polls.
    pub fn then_idle(mut self, count: usize) -> Self {
        self.events
            .extend(std::iter::repeat(InputEvent::Timeout).take(count));
        self
    }

    pub fn then(mut self, event: InputEvent) -> Self {
        self.events.push_back(event);
        self
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, timeout: Duration) -> io::Result<InputEvent> {
        let event = self.events.pop_front().unwrap_or(InputEvent::Quit);
        if event == InputEvent::Timeout {
            if let Some(clock) = &self.clock {
                clock.advance(timeout);
            }
        }
        Ok(event)
    }
}
