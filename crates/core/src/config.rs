//! Runtime settings shared by the server and the command-line tools.

use std::path::PathBuf;

pub const LOG_DIR_ENV: &str = "AYLA_LOG_DIR";
const DEFAULT_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory receiving the daily log files.
    pub log_dir: PathBuf,
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    pub log_filter: String,
    /// Mirror log output to stderr. Must stay off while stdout carries the
    /// protocol.
    pub log_to_stderr: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_dir: default_log_dir(),
            log_filter: DEFAULT_FILTER.to_string(),
            log_to_stderr: false,
        }
    }
}

impl Config {
    /// Defaults, with the log directory taken from `AYLA_LOG_DIR` when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(dir) = std::env::var_os(LOG_DIR_ENV).filter(|d| !d.is_empty()) {
            config.log_dir = PathBuf::from(dir);
        }
        config
    }

    pub fn with_log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = dir.into();
        self
    }

    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    pub fn with_stderr(mut self, enabled: bool) -> Self {
        self.log_to_stderr = enabled;
        self
    }
}

fn default_log_dir() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".ayla").join("logs")
}
