use std::ffi::OsStr;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable naming the log file prefix.
pub const LOG_ENV: &str = "BONES_LOG";

/// File logging, off unless `BONES_LOG` is set.
///
/// Nothing is ever written to the terminal: it would land in the middle of
/// the writing surface. Filtering follows `RUST_LOG`, `info` otherwise.
pub fn init_tracing() {
    let Some(prefix) = std::env::var_os(LOG_ENV) else {
        return;
    };
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let path = log_file_path(&prefix, secs, std::process::id());

    let file = match std::fs::File::create(&path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("Warning: cannot create log file {}: {}", path.display(), err);
            return;
        }
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            fmt::layer()
                .with_writer(file)
                .with_ansi(false)
                .with_timer(fmt::time::UtcTime::rfc_3339()),
        )
        .init();
}

/// `{prefix}.{secs}.{pid}`, so concurrent runs never share a file.
fn log_file_path(prefix: &OsStr, secs: u64, pid: u32) -> PathBuf {
    let mut name = prefix.to_os_string();
    name.push(format!(".{}.{}", secs, pid));
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_path_is_unique_per_run() {
        let path = log_file_path(OsStr::new("/tmp/bones.log"), 1_700_000_000, 42);
        assert_eq!(path, PathBuf::from("/tmp/bones.log.1700000000.42"));
        assert_ne!(path, log_file_path(OsStr::new("/tmp/bones.log"), 1_700_000_000, 43));
    }
}
