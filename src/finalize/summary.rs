use std::fmt;
use std::time::Duration;

/// Final numbers for a finished session, computed from the saved file.
///
/// `word_count` splits the whole file on whitespace, so it can differ from
/// the live count shown during the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub word_count: u64,
    pub duration_seconds: u64,
    pub wpm: u64,
}

impl SessionSummary {
    pub fn from_text(text: &str, elapsed: Duration) -> Self {
        let word_count = text.split_whitespace().count() as u64;
        let duration_seconds = elapsed.as_secs();
        let wpm = if duration_seconds == 0 {
            0
        } else {
            word_count * 60 / duration_seconds
        };
        Self {
            word_count,
            duration_seconds,
            wpm,
        }
    }
}

impl fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Session time: {}", humanize_duration(self.duration_seconds))?;
        writeln!(f, "Words: {}", self.word_count)?;
        writeln!(f, "WPM: {}", self.wpm)
    }
}

/// "1 hour, 2 minutes and 3 seconds". Zero parts are left out.
pub fn humanize_duration(seconds: u64) -> String {
    let parts: Vec<String> = [
        (seconds / 86_400, "day"),
        ((seconds % 86_400) / 3600, "hour"),
        ((seconds % 3600) / 60, "minute"),
        (seconds % 60, "second"),
    ]
    .into_iter()
    .filter(|(value, _)| *value > 0)
    .map(|(value, unit)| {
        if value == 1 {
            format!("1 {}", unit)
        } else {
            format!("{} {}s", value, unit)
        }
    })
    .collect();

    match parts.as_slice() {
        [] => "0 seconds".to_string(),
        [only] => only.clone(),
        [head @ .., last] => format!("{} and {}", head.join(", "), last),
    }
}
