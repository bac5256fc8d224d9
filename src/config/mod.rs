//! Configuration: TOML file, serde defaults, per-run CLI overrides.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{Config, GitConfig, LayoutConfig, StorageConfig, WriterConfig};
