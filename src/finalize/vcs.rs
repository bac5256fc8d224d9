//! Optional git bookkeeping for the documents directory.
//!
//! Shells out to the `git` binary. Every failure here is reported and then
//! ignored by callers: the session file is already safe on disk.

use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VcsError {
    #[error("Failed to run git: {0}")]
    Spawn(#[from] io::Error),

    #[error("git {command} failed: {stderr}")]
    Failed { command: String, stderr: String },
}

pub struct Git {
    repo: PathBuf,
}

impl Git {
    pub fn new(repo: impl Into<PathBuf>) -> Self {
        Self { repo: repo.into() }
    }

    pub fn repo(&self) -> &Path {
        &self.repo
    }

    pub fn is_repo(&self) -> bool {
        self.run(&["rev-parse", "--is-inside-work-tree"]).is_ok()
    }

    /// True when `git status --porcelain` reports anything.
    pub fn is_dirty(&self) -> Result<bool, VcsError> {
        let status = self.run(&["status", "--porcelain"])?;
        Ok(!status.trim().is_empty())
    }

    /// Stage `paths` and commit them with `message`.
    pub fn commit(&self, paths: &[&Path], message: &str) -> Result<(), VcsError> {
        let mut add: Vec<String> = vec!["add".into(), "--".into()];
        add.extend(paths.iter().map(|p| p.to_string_lossy().into_owned()));
        let add: Vec<&str> = add.iter().map(String::as_str).collect();
        self.run(&add)?;
        self.run(&["commit", "--quiet", "-m", message])?;
        tracing::info!(repo = %self.repo.display(), message, "committed session");
        Ok(())
    }

    pub fn push(&self) -> Result<(), VcsError> {
        self.run(&["push", "--quiet"])?;
        tracing::info!(repo = %self.repo.display(), "pushed documents");
        Ok(())
    }

    fn run(&self, args: &[&str]) -> Result<String, VcsError> {
        let output = Command::new("git")
            .arg("-C")
            .arg(&self.repo)
            .args(args)
            .output()?;
        if !output.status.success() {
            return Err(VcsError::Failed {
                command: args.first().copied().unwrap_or_default().to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// `bones: <title> (<words> words)`
pub fn commit_message(title: &str, words: u64) -> String {
    format!("bones: {} ({} words)", title, words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn git_available() -> bool {
        Command::new("git").arg("--version").output().is_ok()
    }

    fn init_repo(dir: &Path) {
        for args in [
            vec!["init", "--quiet"],
            vec!["config", "user.email", "writer@example.com"],
            vec!["config", "user.name", "Writer"],
            vec!["config", "commit.gpgsign", "false"],
        ] {
            let status = Command::new("git").arg("-C").arg(dir).args(&args).status().unwrap();
            assert!(status.success());
        }
    }

    #[test]
    fn message_format() {
        assert_eq!(commit_message("morning", 312), "bones: morning (312 words)");
    }

    #[test]
    fn outside_a_repo() {
        if !git_available() {
            return;
        }
        let dir = TempDir::new().unwrap();
        let git = Git::new(dir.path().join("missing"));
        assert!(!git.is_repo());
        assert!(git.is_dirty().is_err());
    }

    #[test]
    fn commit_cleans_the_tree() {
        if !git_available() {
            return;
        }
        let dir = TempDir::new().unwrap();
        init_repo(dir.path());
        let git = Git::new(dir.path());
        assert!(git.is_repo());
        assert!(!git.is_dirty().unwrap());

        let file = dir.path().join("notes.txt");
        fs::write(&file, "hello").unwrap();
        assert!(git.is_dirty().unwrap());

        git.commit(&[file.as_path()], &commit_message("notes", 1)).unwrap();
        assert!(!git.is_dirty().unwrap());
    }
}
