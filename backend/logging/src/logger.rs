//! Structured Logger
//!
//! Wraps `tracing` with a human-readable console layer on stderr and an
//! optional NDJSON file layer with daily rotation.

use std::path::Path;

use anyhow::Result;
use tracing::warn;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Env var consulted before `RUST_LOG`.
pub const LOG_ENV: &str = "BENCHFORGE_LOG";

/// Build the level filter: `BENCHFORGE_LOG`, then `RUST_LOG`, then `level`.
pub fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(level))
}

/// Initialize the global logger.
///
/// Console output goes to stderr so stdout stays free for `--json`
/// summaries. With `log_dir`, NDJSON is also written to
/// `<log_dir>/benchforge.log.YYYY-MM-DD`. When the directory cannot be
/// created, logging continues on the console only.
pub fn init_logger(log_dir: Option<&Path>, level: &str) -> Result<()> {
    let mut dir_error = None;
    let file_layer = match log_dir {
        Some(dir) => match std::fs::create_dir_all(dir) {
            Ok(()) => {
                let appender = RollingFileAppender::new(Rotation::DAILY, dir, "benchforge.log");
                Some(fmt::layer().json().with_writer(appender).with_ansi(false))
            }
            Err(err) => {
                dir_error = Some((dir.to_path_buf(), err));
                None
            }
        },
        None => None,
    };

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(true);

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(env_filter(level))
        .with(console_layer)
        .with(file_layer)
        .try_init();

    if let Some((dir, err)) = dir_error {
        warn!(dir = %dir.display(), error = %err, "Failed to create log directory; file logging disabled");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_twice_is_harmless() {
        let dir = std::env::temp_dir().join("benchforge-logger-test");
        init_logger(Some(&dir), "info").unwrap();
        init_logger(None, "debug").unwrap();
        assert!(dir.exists());
    }

    #[test]
    fn unusable_log_dir_falls_back_to_console() {
        let root = tempfile::tempdir().unwrap();
        let blocker = root.path().join("not-a-dir");
        std::fs::write(&blocker, "file").unwrap();
        let dir = blocker.join("logs");

        assert!(init_logger(Some(&dir), "info").is_ok());
        assert!(!dir.exists());
    }
}
