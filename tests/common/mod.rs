//! Shared helpers for driving sessions headlessly.

#![allow(dead_code)]

use bones::config::Config;
use bones::session::{ManualClock, OutputSink, Session, StopReason, Tick};
use bones::ui::input::ScriptedInput;
use bones::ui::surface::MemorySurface;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub type TestSession = Session<MemorySurface, ScriptedInput>;

/// Temp documents directory plus a shared manual clock.
pub struct Harness {
    pub dir: TempDir,
    pub clock: ManualClock,
    pub config: Config,
}

impl Harness {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let mut config = Config::default();
        config.storage.documents_dir = dir.path().to_path_buf();
        config.storage.dictionary = dir.path().join("words");
        Self {
            dir,
            clock: ManualClock::new(),
            config,
        }
    }

    pub fn output_path(&self) -> PathBuf {
        self.dir.path().join("2026-01-01_09-30-00.txt")
    }

    /// Session on a `cols` x `rows` memory surface. Idle polls advance the
    /// harness clock by the poll interval.
    pub fn start(&self, input: ScriptedInput, cols: u16, rows: u16) -> TestSession {
        let sink = OutputSink::create(self.output_path()).expect("Failed to create output file");
        Session::new(
            MemorySurface::new(cols, rows),
            input.with_clock(self.clock.clone()),
            self.clock.clone(),
            &self.config,
            sink,
        )
        .expect("Failed to start session")
    }
}

/// Step until the session stops.
pub fn drive(session: &mut TestSession) -> StopReason {
    loop {
        match session.step().expect("session step failed") {
            Tick::Continue => {}
            Tick::Stopped(reason) => return reason,
        }
    }
}

pub fn read(path: &Path) -> String {
    std::fs::read_to_string(path).expect("Failed to read output file")
}

/// Write a config file into `dir` and return its path.
pub fn write_config(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("config.toml");
    std::fs::write(&path, body).expect("Failed to write config");
    path
}
