use crossterm::cursor::{SetCursorStyle, Show};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, Clear as TermClear, ClearType, DisableLineWrap,
    EnableLineWrap, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, ExecutableCommand};
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Holds the terminal in writing mode. Dropping it, or a panic while it is
/// alive, puts the terminal back exactly once.
pub struct TerminalGuard {
    active: Arc<AtomicBool>,
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        leave(&self.active);
    }
}

fn leave(active: &AtomicBool) {
    if !active.swap(false, Ordering::SeqCst) {
        return;
    }
    let _ = disable_raw_mode();
    let _ = execute!(
        io::stdout(),
        SetCursorStyle::DefaultUserShape,
        EnableLineWrap,
        LeaveAlternateScreen,
        Show
    );
}

/// Raw mode, alternate screen, a steady bar cursor and no autowrap: the
/// session positions every character itself.
pub fn setup_terminal() -> io::Result<TerminalGuard> {
    enable_raw_mode()?;
    let active = Arc::new(AtomicBool::new(true));
    let guard = TerminalGuard {
        active: Arc::clone(&active),
    };

    let mut stdout = io::stdout();
    stdout
        .execute(EnterAlternateScreen)?
        .execute(DisableLineWrap)?
        .execute(TermClear(ClearType::All))?
        .execute(SetCursorStyle::SteadyBar)?
        .execute(Show)?;
    stdout.flush()?;

    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        leave(&active);
        previous(info);
    }));

    Ok(guard)
}
