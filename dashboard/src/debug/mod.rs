//! # Logging and Task Tracking
//!
//! - **File-based logging**: Structured logs to `logs/dashboard.log` (daily rotation)
//! - **Task tracking**: Lifecycle logging for background refresh tasks
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dashboard::debug::{self, DebugConfig};
//!
//! let _guard = debug::init_logger(&DebugConfig::from_env());
//! tracing::info!(endpoint = "/api/admin/summary", duration_ms = 234, "API call completed");
//! ```
//!
//! ## Configuration
//!
//! Environment variables:
//! - `RUST_LOG`: Log level filter (e.g., `dashboard=debug,info`)
//! - `DASHBOARD_LOG_DIR`: Log directory (default: `logs`)
//! - `DASHBOARD_LOG_STDERR`: Mirror logs to stderr (1=on)

pub mod config;
pub mod logger;
pub mod task_tracker;

pub use config::DebugConfig;
pub use logger::init as init_logger;
pub use task_tracker::{active_task_count, spawn_tracked};
