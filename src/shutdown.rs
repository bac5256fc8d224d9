use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use signal_hook::consts::signal::{SIGHUP, SIGTERM};

/// Lightweight handle for requesting and checking a session stop.
///
/// Clones share the same flag. Signal handlers only ever set it; the session
/// loop observes it at the top of its next poll.
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    stop: Arc<AtomicBool>,
}

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route SIGTERM and SIGHUP to this handle. Ctrl+C arrives as a key
    /// while the terminal is in raw mode.
    ///
    /// The first signal only sets the flag. A second one, once the flag is
    /// already set, terminates the process with exit code 1.
    pub fn register_signals(&self) -> io::Result<()> {
        for signal in [SIGTERM, SIGHUP] {
            signal_hook::flag::register_conditional_shutdown(signal, 1, Arc::clone(&self.stop))?;
            signal_hook::flag::register(signal, Arc::clone(&self.stop))?;
        }
        Ok(())
    }

    pub fn signal(&self) {
        if !self.stop.swap(true, Ordering::SeqCst) {
            tracing::info!("stop requested");
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.stop.load(Ordering::SeqCst)
    }
}
