use crossterm::event::{self, Event};
use std::io;
use std::time::{Duration, Instant};

use crate::shutdown::StopHandle;
use crate::ui::input::{translate_key, InputEvent, InputSource};

/// Input source reading the terminal through crossterm.
///
/// Pending stop requests win over queued keys: they are checked before
/// every wait.
pub struct CrosstermInput {
    stop: StopHandle,
}

impl CrosstermInput {
    pub fn new(stop: StopHandle) -> Self {
        Self { stop }
    }
}

impl InputSource for CrosstermInput {
    fn poll(&mut self, timeout: Duration) -> io::Result<InputEvent> {
        let deadline = Instant::now() + timeout;
        loop {
            if self.stop.is_stopped() {
                return Ok(InputEvent::Interrupt);
            }

            let remaining = deadline.saturating_duration_since(Instant::now());
            let ready = match event::poll(remaining) {
                Ok(ready) => ready,
                // A signal landing mid-wait shows up as EINTR
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            };
            if !ready {
                return Ok(InputEvent::Timeout);
            }

            match event::read()? {
                Event::Key(key) => {
                    if let Some(event) = translate_key(key) {
                        return Ok(event);
                    }
                }
                Event::Resize(cols, rows) => return Ok(InputEvent::Resize(cols, rows)),
                _ => {}
            }

            // Swallowed events still use up the wait.
            if Instant::now() >= deadline {
                return Ok(InputEvent::Timeout);
            }
        }
    }
}
