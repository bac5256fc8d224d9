//! Append-only session log, one JSON object per line.

use chrono::{DateTime, Local};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("Failed to access stats log {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to encode session record: {0}")]
    Encode(#[from] serde_json::Error),
}

/// One finished session as stored in the log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub timestamp: DateTime<Local>,
    pub filepath: PathBuf,
    pub duration_seconds: u64,
    pub word_count: u64,
    pub wpm: u64,
    #[serde(default)]
    pub spelling_accuracy: Option<f64>,
}

pub struct StatsLog {
    path: PathBuf,
}

impl StatsLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record. The file is held under an exclusive lock while
    /// the line is written so concurrent sessions never interleave.
    pub fn append(&self, record: &SessionRecord) -> Result<(), HistoryError> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| self.io_error(source))?;

        file.lock_exclusive().map_err(|source| self.io_error(source))?;
        let written = file
            .write_all(line.as_bytes())
            .and_then(|()| file.flush());
        let unlocked = FileExt::unlock(&file);
        written.map_err(|source| self.io_error(source))?;
        unlocked.map_err(|source| self.io_error(source))?;

        tracing::debug!(path = %self.path.display(), "session record appended");
        Ok(())
    }

    /// Every readable record, oldest first. A missing log is empty;
    /// malformed lines are skipped with a warning.
    pub fn load(&self) -> Result<Vec<SessionRecord>, HistoryError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(self.io_error(source)),
        };

        let mut records = Vec::new();
        for (index, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<SessionRecord>(line) {
                Ok(record) => records.push(record),
                Err(err) => tracing::warn!(
                    path = %self.path.display(),
                    line = index + 1,
                    error = %err,
                    "skipping malformed stats line"
                ),
            }
        }
        Ok(records)
    }

    fn io_error(&self, source: io::Error) -> HistoryError {
        HistoryError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

/// Aggregates over the whole log.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsTotals {
    pub sessions: usize,
    pub words: u64,
    pub seconds: u64,
    /// Mean of per-session WPM.
    pub average_wpm: f64,
    pub best_wpm: u64,
    /// Mean over the sessions that have an accuracy.
    pub average_accuracy: Option<f64>,
}

impl StatsTotals {
    pub fn from_records(records: &[SessionRecord]) -> Self {
        let sessions = records.len();
        let words = records.iter().map(|r| r.word_count).sum();
        let seconds = records.iter().map(|r| r.duration_seconds).sum();
        let best_wpm = records.iter().map(|r| r.wpm).max().unwrap_or(0);
        let average_wpm = if sessions == 0 {
            0.0
        } else {
            records.iter().map(|r| r.wpm as f64).sum::<f64>() / sessions as f64
        };

        let accuracies: Vec<f64> = records.iter().filter_map(|r| r.spelling_accuracy).collect();
        let average_accuracy = if accuracies.is_empty() {
            None
        } else {
            Some(accuracies.iter().sum::<f64>() / accuracies.len() as f64)
        };

        Self {
            sessions,
            words,
            seconds,
            average_wpm,
            best_wpm,
            average_accuracy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn record(words: u64, wpm: u64, accuracy: Option<f64>) -> SessionRecord {
        SessionRecord {
            timestamp: Local.with_ymd_and_hms(2026, 5, 1, 10, 0, 0).unwrap(),
            filepath: PathBuf::from("/tmp/notes/a.txt"),
            duration_seconds: 60,
            word_count: words,
            wpm,
            spelling_accuracy: accuracy,
        }
    }

    #[test]
    fn append_then_load() {
        let dir = TempDir::new().unwrap();
        let log = StatsLog::new(dir.path().join("nested/stats.jsonl"));
        log.append(&record(10, 10, Some(90.0))).unwrap();
        log.append(&record(20, 20, None)).unwrap();

        let loaded = log.load().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0], record(10, 10, Some(90.0)));
        assert_eq!(loaded[1].spelling_accuracy, None);

        let raw = fs::read_to_string(log.path()).unwrap();
        assert_eq!(raw.lines().count(), 2);
    }

    #[test]
    fn missing_log_is_empty() {
        let dir = TempDir::new().unwrap();
        let log = StatsLog::new(dir.path().join("stats.jsonl"));
        assert!(log.load().unwrap().is_empty());
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let dir = TempDir::new().unwrap();
        let log = StatsLog::new(dir.path().join("stats.jsonl"));
        log.append(&record(5, 5, None)).unwrap();
        let mut file = OpenOptions::new().append(true).open(log.path()).unwrap();
        writeln!(file, "{{not json").unwrap();
        writeln!(file).unwrap();
        drop(file);
        log.append(&record(7, 7, None)).unwrap();

        let loaded = log.load().unwrap();
        assert_eq!(loaded.iter().map(|r| r.word_count).collect::<Vec<_>>(), vec![5, 7]);
    }

    #[test]
    fn totals_aggregate_sessions() {
        let records = vec![
            record(100, 30, Some(90.0)),
            record(50, 10, None),
            record(150, 50, Some(80.0)),
        ];
        let totals = StatsTotals::from_records(&records);
        assert_eq!(totals.sessions, 3);
        assert_eq!(totals.words, 300);
        assert_eq!(totals.seconds, 180);
        assert_eq!(totals.best_wpm, 50);
        assert!((totals.average_wpm - 30.0).abs() < f64::EPSILON);
        assert_eq!(totals.average_accuracy, Some(85.0));
    }

    #[test]
    fn totals_of_nothing() {
        let totals = StatsTotals::from_records(&[]);
        assert_eq!(totals.sessions, 0);
        assert_eq!(totals.average_wpm, 0.0);
        assert_eq!(totals.average_accuracy, None);
    }
}
