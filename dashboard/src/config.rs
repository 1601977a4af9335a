//! # Client Configuration
//!
//! Configuration loaded from environment variables and validated on startup so a
//! misconfigured client fails fast instead of silently dropping into demo mode.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `DASHBOARD_API_URL` | `http://127.0.0.1:3001` | Backend base URL |
//! | `DASHBOARD_TIMEOUT_SECS` | `10` | Per-request transport timeout |
//! | `DASHBOARD_STATE_DIR` | `.dashboard` | Directory for persisted client slots |
//! | `DASHBOARD_REFRESH_SECS` | unset | Periodic refresh interval (0 disables) |
//! | `DASHBOARD_DEMO_SEED` | `20240901` | Seed for synthetic demo data |

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::core::error::{AppError, Result};

const DEFAULT_API_URL: &str = "http://127.0.0.1:3001";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_STATE_DIR: &str = ".dashboard";
pub const DEFAULT_DEMO_SEED: u64 = 20_240_901;

/// Dashboard client configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend base URL, without trailing slash
    pub api_url: String,
    /// Transport timeout; requests exceeding it classify as `Timeout`
    pub timeout: Duration,
    /// Directory holding persisted slots (credential)
    pub state_dir: PathBuf,
    /// Periodic refresh interval for dashboard views
    pub refresh_interval: Option<Duration>,
    /// Seed for the demo data source
    pub demo_seed: u64,
}

impl ClientConfig {
    /// Configuration with defaults for everything but the base URL.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            state_dir: PathBuf::from(DEFAULT_STATE_DIR),
            refresh_interval: None,
            demo_seed: DEFAULT_DEMO_SEED,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_state_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.state_dir = dir.into();
        self
    }

    pub fn with_refresh_interval(mut self, interval: Option<Duration>) -> Self {
        self.refresh_interval = interval;
        self
    }

    pub fn with_demo_seed(mut self, seed: u64) -> Self {
        self.demo_seed = seed;
        self
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let api_url = env::var("DASHBOARD_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let timeout_secs: u64 = env::var("DASHBOARD_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .map_err(|e| AppError::Config(format!("DASHBOARD_TIMEOUT_SECS must be a valid number: {}", e)))?;

        let state_dir = env::var("DASHBOARD_STATE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_STATE_DIR));

        let refresh_interval = match env::var("DASHBOARD_REFRESH_SECS") {
            Ok(raw) => {
                let secs: u64 = raw.parse().map_err(|e| {
                    AppError::Config(format!("DASHBOARD_REFRESH_SECS must be a valid number: {}", e))
                })?;
                (secs > 0).then(|| Duration::from_secs(secs))
            }
            Err(_) => None,
        };

        let demo_seed = match env::var("DASHBOARD_DEMO_SEED") {
            Ok(raw) => raw
                .parse()
                .map_err(|e| AppError::Config(format!("DASHBOARD_DEMO_SEED must be a valid number: {}", e)))?,
            Err(_) => DEFAULT_DEMO_SEED,
        };

        let config = Self::new(api_url)
            .with_timeout(Duration::from_secs(timeout_secs))
            .with_state_dir(state_dir)
            .with_refresh_interval(refresh_interval)
            .with_demo_seed(demo_seed);
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(AppError::Config(format!(
                "DASHBOARD_API_URL must start with http:// or https:// (got {})",
                self.api_url
            )));
        }

        let secs = self.timeout.as_secs();
        if !(1..=120).contains(&secs) {
            return Err(AppError::Config(
                "DASHBOARD_TIMEOUT_SECS must be between 1 and 120".to_string(),
            ));
        }

        Ok(())
    }

    /// Absolute URL for an endpoint path.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path.trim_start_matches('/'))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}
