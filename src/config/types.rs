use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration container.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub writer: WriterConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub git: GitConfig,
}

/// Tuning for the writing session: fading, status bar, tick rate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WriterConfig {
    /// Seconds of inactivity before on-screen text starts fading (default: 5.0).
    #[serde(default = "default_blank_timeout")]
    pub blank_timeout: f64,
    /// Number of discrete brightness levels in a fade (default: 32).
    #[serde(default = "default_fade_steps")]
    pub fade_steps: u16,
    /// Seconds between two fade steps (default: 0.1).
    #[serde(default = "default_fade_interval")]
    pub fade_interval: f64,
    /// Gray level of the status bar, 0..=255 (default: 128).
    #[serde(default = "default_stats_brightness")]
    pub stats_brightness: u8,
    /// Bounded input wait per loop tick in milliseconds (default: 50).
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

/// Margins around the writing area.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LayoutConfig {
    #[serde(default = "default_margin_top")]
    pub margin_top: u16,
    #[serde(default = "default_margin_bottom")]
    pub margin_bottom: u16,
    #[serde(default = "default_margin_sides")]
    pub margin_sides: u16,
}

/// Where sessions and statistics are kept.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    /// Root directory for written sessions. `~/` is expanded.
    #[serde(default = "default_documents_dir")]
    pub documents_dir: PathBuf,
    /// Stats log file name, relative to `documents_dir`.
    #[serde(default = "default_stats_file")]
    pub stats_file: PathBuf,
    /// Newline separated word list used for spelling accuracy.
    #[serde(default = "default_dictionary")]
    pub dictionary: PathBuf,
}

/// Optional version control of the documents directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GitConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub push: bool,
}

fn default_blank_timeout() -> f64 {
    5.0
}

fn default_fade_steps() -> u16 {
    32
}

fn default_fade_interval() -> f64 {
    0.1
}

fn default_stats_brightness() -> u8 {
    128
}

fn default_poll_interval_ms() -> u64 {
    50
}

fn default_margin_top() -> u16 {
    2
}

fn default_margin_bottom() -> u16 {
    2
}

fn default_margin_sides() -> u16 {
    6
}

fn default_documents_dir() -> PathBuf {
    PathBuf::from("~/Documents/bones")
}

fn default_stats_file() -> PathBuf {
    PathBuf::from("stats.jsonl")
}

fn default_dictionary() -> PathBuf {
    PathBuf::from("/usr/share/dict/words")
}

impl WriterConfig {
    pub fn blank_timeout(&self) -> Duration {
        seconds(self.blank_timeout)
    }

    pub fn fade_interval(&self) -> Duration {
        seconds(self.fade_interval)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            blank_timeout: default_blank_timeout(),
            fade_steps: default_fade_steps(),
            fade_interval: default_fade_interval(),
            stats_brightness: default_stats_brightness(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            margin_top: default_margin_top(),
            margin_bottom: default_margin_bottom(),
            margin_sides: default_margin_sides(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            documents_dir: default_documents_dir(),
            stats_file: default_stats_file(),
            dictionary: default_dictionary(),
        }
    }
}

impl StorageConfig {
    /// Documents directory with `~/` expanded.
    pub fn documents_dir(&self) -> PathBuf {
        expand_tilde(&self.documents_dir)
    }

    /// Absolute path of the stats log.
    pub fn stats_path(&self) -> PathBuf {
        self.documents_dir().join(&self.stats_file)
    }

    pub fn dictionary(&self) -> PathBuf {
        expand_tilde(&self.dictionary)
    }
}

/// Saturating conversion: NaN and negatives are zero, values too large for
/// a `Duration` are `Duration::MAX`.
fn seconds(value: f64) -> Duration {
    if value.is_nan() || value <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(value).unwrap_or(Duration::MAX)
}

fn expand_tilde(path: &std::path::Path) -> PathBuf {
    let path_str = path.to_string_lossy();
    if let Some(rest) = path_str.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    path.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writer_durations_follow_seconds() {
        let writer = WriterConfig::default();
        assert_eq!(writer.blank_timeout(), Duration::from_secs(5));
        assert_eq!(writer.fade_interval(), Duration::from_millis(100));
        assert_eq!(writer.poll_interval(), Duration::from_millis(50));
    }

    #[test]
    fn out_of_range_seconds_saturate() {
        let writer = WriterConfig {
            blank_timeout: 1e20,
            fade_interval: -1.0,
            ..WriterConfig::default()
        };
        assert_eq!(writer.blank_timeout(), Duration::MAX);
        assert_eq!(writer.fade_interval(), Duration::ZERO);
    }

    #[test]
    fn absolute_paths_are_not_expanded() {
        let path = PathBuf::from("/tmp/bones");
        assert_eq!(expand_tilde(&path), path);
    }

    #[test]
    fn stats_path_is_inside_documents_dir() {
        let storage = StorageConfig {
            documents_dir: PathBuf::from("/srv/writing"),
            ..StorageConfig::default()
        };
        assert_eq!(storage.stats_path(), PathBuf::from("/srv/writing/stats.jsonl"));
    }
}
