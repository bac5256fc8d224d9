//! Everything that happens to a session file after the terminal is back:
//! summary, naming, relocation, spelling, stats log and git.

pub mod history;
pub mod naming;
pub mod plot;
pub mod spelling;
pub mod summary;
pub mod vcs;

pub use history::{HistoryError, SessionRecord, StatsLog, StatsTotals};
pub use naming::{Naming, DEFAULT_CATEGORY};
pub use summary::SessionSummary;
pub use vcs::{Git, VcsError};

use chrono::Local;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::Config;
use crate::session::SessionReport;
use spelling::Dictionary;

#[derive(Debug, Error)]
pub enum FinalizeError {
    #[error("Failed to read session file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to move session file {path}: {source}")]
    Relocate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Prompt failed: {0}")]
    Prompt(#[from] io::Error),

    #[error(transparent)]
    History(#[from] HistoryError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Nothing was typed; the empty file was removed.
    Discarded,
    Saved(SessionRecord),
}

/// Terminal-free side of the pipeline. `ask` decides whether the writer is
/// asked for a category and title; without it the file keeps its timestamp
/// name under [`DEFAULT_CATEGORY`].
pub fn finalize<R: BufRead, W: Write>(
    report: &SessionReport,
    config: &Config,
    input: &mut R,
    output: &mut W,
    ask: bool,
) -> Result<Outcome, FinalizeError> {
    let text = fs::read_to_string(&report.path).map_err(|source| FinalizeError::Read {
        path: report.path.clone(),
        source,
    })?;

    if text.is_empty() {
        fs::remove_file(&report.path).map_err(|source| FinalizeError::Relocate {
            path: report.path.clone(),
            source,
        })?;
        tracing::info!(path = %report.path.display(), "empty session discarded");
        writeln!(output, "Nothing written, session discarded.")?;
        return Ok(Outcome::Discarded);
    }

    let summary = SessionSummary::from_text(&text, report.elapsed);
    write!(output, "{}", summary)?;

    let documents_dir = config.storage.documents_dir();
    let stem = report
        .path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "session".to_string());
    let naming = if ask {
        let categories = naming::existing_categories(&documents_dir)?;
        naming::prompt_naming(input, output, &categories, &stem)?
    } else {
        Naming::unsorted(stem)
    };

    let filepath = naming::relocate(&report.path, &documents_dir, &naming).map_err(|source| {
        FinalizeError::Relocate {
            path: report.path.clone(),
            source,
        }
    })?;
    writeln!(output, "Saved to {}", filepath.display())?;

    let spelling_accuracy = spelling_accuracy(&text, &config.storage.dictionary());
    if let Some(accuracy) = spelling_accuracy {
        writeln!(output, "Spelling accuracy: {:.1}%", accuracy)?;
    }

    let record = SessionRecord {
        timestamp: Local::now(),
        filepath,
        duration_seconds: summary.duration_seconds,
        word_count: summary.word_count,
        wpm: summary.wpm,
        spelling_accuracy,
    };
    let log = StatsLog::new(config.storage.stats_path());
    log.append(&record)?;
    tracing::info!(
        path = %record.filepath.display(),
        words = record.word_count,
        wpm = record.wpm,
        "session finalized"
    );

    if config.git.enabled {
        let git = Git::new(&documents_dir);
        let message = vcs::commit_message(&naming.title, summary.word_count);
        let paths = [record.filepath.as_path(), log.path()];
        if let Err(err) = commit_session(&git, &paths, &message, config.git.push) {
            tracing::warn!(error = %err, "git step failed");
            writeln!(output, "Warning: {}", err)?;
        }
    }

    Ok(Outcome::Saved(record))
}

fn spelling_accuracy(text: &str, dictionary: &Path) -> Option<f64> {
    match Dictionary::load(dictionary) {
        Ok(dict) if !dict.is_empty() => spelling::accuracy(text, &dict),
        Ok(_) => None,
        Err(err) => {
            tracing::warn!(path = %dictionary.display(), error = %err, "dictionary unavailable");
            None
        }
    }
}

fn commit_session(git: &Git, paths: &[&Path], message: &str, push: bool) -> Result<(), VcsError> {
    git.commit(paths, message)?;
    if push {
        git.push()?;
    }
    Ok(())
}

/// Warn before a session when the documents repository has uncommitted
/// changes. Returns the warning, if any.
pub fn dirty_repo_warning(config: &Config) -> Option<String> {
    if !config.git.enabled {
        return None;
    }
    let git = Git::new(config.storage.documents_dir());
    if !git.is_repo() {
        return Some(format!(
            "git is enabled but {} is not a repository",
            git.repo().display()
        ));
    }
    match git.is_dirty() {
        Ok(true) => Some(format!("{} has uncommitted changes", git.repo().display())),
        Ok(false) => None,
        Err(err) => {
            tracing::warn!(error = %err, "git status failed");
            Some(err.to_string())
        }
    }
}
