use std::path::PathBuf;

use benchforge_config::DEFAULT_START_PAGE;

/// Runtime settings read from the environment; CLI flags override them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Default log level when neither `BENCHFORGE_LOG` nor `RUST_LOG` is set
    pub log_level: String,
    /// Directory for NDJSON log files; console only when unset
    pub log_dir: Option<PathBuf>,
    /// First page scanned for recommendations (1-based)
    pub start_page: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_dir: None,
            start_page: DEFAULT_START_PAGE,
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            log_level: lookup("BENCHFORGE_LOG_LEVEL").unwrap_or(defaults.log_level),
            log_dir: lookup("BENCHFORGE_LOG_DIR")
                .filter(|d| !d.trim().is_empty())
                .map(PathBuf::from),
            start_page: lookup("BENCHFORGE_START_PAGE")
                .and_then(|p| p.trim().parse().ok())
                .filter(|p: &usize| *p > 0)
                .unwrap_or(defaults.start_page),
        }
    }
}
