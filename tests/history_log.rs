use bones::finalize::{SessionRecord, StatsLog};
use chrono::Local;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

fn record(words: u64) -> SessionRecord {
    SessionRecord {
        timestamp: Local::now(),
        filepath: PathBuf::from(format!("/docs/notes/{words}.txt")),
        duration_seconds: 60,
        word_count: words,
        wpm: words,
        spelling_accuracy: Some(99.5),
    }
}

#[test]
fn concurrent_appends_never_interleave() {
    let dir = TempDir::new().unwrap();
    let path = Arc::new(dir.path().join("stats.jsonl"));

    let handles: Vec<_> = (0..8u64)
        .map(|writer| {
            let path = Arc::clone(&path);
            thread::spawn(move || {
                let log = StatsLog::new(path.as_ref().clone());
                for n in 0..25 {
                    log.append(&record(writer * 100 + n)).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let log = StatsLog::new(path.as_ref().clone());
    let mut words: Vec<u64> = log.load().unwrap().iter().map(|r| r.word_count).collect();
    words.sort_unstable();
    let mut expected: Vec<u64> = (0..8u64).flat_map(|w| (0..25).map(move |n| w * 100 + n)).collect();
    expected.sort_unstable();
    assert_eq!(words, expected);
}

#[test]
fn records_are_one_json_object_per_line() {
    let dir = TempDir::new().unwrap();
    let log = StatsLog::new(dir.path().join("stats.jsonl"));
    log.append(&record(42)).unwrap();

    let raw = std::fs::read_to_string(log.path()).unwrap();
    let line = raw.lines().next().unwrap();
    let value: serde_json::Value = serde_json::from_str(line).unwrap();
    for key in ["timestamp", "filepath", "duration_seconds", "word_count", "wpm", "spelling_accuracy"] {
        assert!(value.get(key).is_some(), "missing {key}");
    }
    assert_eq!(value["word_count"], 42);
    assert!(raw.ends_with('\n'));
}

#[test]
fn records_without_accuracy_still_load() {
    let dir = TempDir::new().unwrap();
    let log = StatsLog::new(dir.path().join("stats.jsonl"));
    std::fs::write(
        log.path(),
        "{\"timestamp\":\"2026-04-02T08:00:00+02:00\",\"filepath\":\"x.txt\",\"duration_seconds\":10,\"word_count\":3,\"wpm\":18}\n",
    )
    .unwrap();

    let records = log.load().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].spelling_accuracy, None);
    assert_eq!(records[0].word_count, 3);
}
