//! # Services Module
//!
//! Data sources behind the dashboards.
//!
//! ```text
//! services/
//! ├── api/   - Request client, credentials, demo mode flag, HTTP transport
//! └── demo/  - Synthetic data used when the backend is unreachable
//! ```

pub mod api;
pub mod demo;
