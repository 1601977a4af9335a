//! Logging configuration from environment variables

use std::path::PathBuf;

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugConfig {
    /// Log level filter (e.g., "dashboard=debug,info")
    pub log_level: String,
    /// Log directory (daily rotation)
    pub log_dir: PathBuf,
    /// Mirror log output to stderr
    pub log_to_stderr: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "dashboard=info,warn".to_string(),
            log_dir: PathBuf::from("logs"),
            log_to_stderr: false,
        }
    }
}

impl DebugConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            log_level: std::env::var("RUST_LOG").unwrap_or(defaults.log_level),
            log_dir: std::env::var("DASHBOARD_LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_dir),
            log_to_stderr: std::env::var("DASHBOARD_LOG_STDERR")
                .map(|v| v == "1")
                .unwrap_or(defaults.log_to_stderr),
        }
    }

    /// Path of today's log file prefix
    pub fn log_file(&self) -> PathBuf {
        self.log_dir.join("dashboard.log")
    }

    /// Check if debug logging is enabled
    pub fn is_debug_enabled(&self) -> bool {
        self.log_level.contains("debug") || self.log_level.contains("trace")
    }
}
