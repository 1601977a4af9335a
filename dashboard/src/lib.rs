//! # School Dashboard Client - Library Root
//!
//! Data-aggregation layer behind the role dashboards of a school platform
//! (administrators, faculty, parents, students). Each dashboard fans out to several
//! backend endpoints and must render something sensible no matter which of them fail.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │  facades     AdminDashboard / FacultyDashboard / ...   │
//! │              (declared sections + typed accessors)     │
//! ├────────────────────────────────────────────────────────┤
//! │  app         AggregationOrchestrator, DashboardView    │
//! │              (fan-out, merge, derive, lifecycle)       │
//! ├────────────────────────────────────────────────────────┤
//! │  services    RequestClient ─► Transport (reqwest)      │
//! │              CredentialStore, DemoModeState            │
//! │              DemoDataProvider (seeded synthetic data)  │
//! └────────────────────────────────────────────────────────┘
//!          │
//!          │ HTTP + bearer credential
//!          ▼
//! ┌─────────────────┐
//! │  Backend API    │
//! └─────────────────┘
//! ```
//!
//! ## Failure Handling
//!
//! - **Unauthorized** (401/403): the stored credential is cleared, only that section
//!   falls back.
//! - **Server error / bad body / timeout**: only that section falls back.
//! - **Unreachable**: the session switches to demo mode for good; every later read is
//!   served from the demo dataset without touching the network, and writes fail fast.
//!
//! Failures never cross a section boundary and never reach presentation code.
//!
//! ## Usage
//!
//! ```no_run
//! use dashboard::{ClientConfig, Session};
//!
//! # async fn run() -> dashboard::Result<()> {
//! let session = Session::from_config(ClientConfig::from_env()?)?;
//! let model = session.parent().load_dashboard().await;
//! println!("{:?} {:?}", model.status, model.derived());
//! # Ok(())
//! # }
//! ```
//!
//! ## Testing
//!
//! ```bash
//! cargo test -p dashboard
//! ```
//!
//! Tests run against `testing::ScriptedTransport`; no backend is needed.

pub mod app;
pub mod config;
pub mod core;
pub mod debug;
pub mod facades;
pub mod services;

#[cfg(test)]
mod testing;

pub use app::{AggregationOrchestrator, DashboardEvent, DashboardModel, DashboardView, LoadState, LoadStatus, Session};
pub use config::ClientConfig;
pub use crate::core::{AppError, FailureKind, RequestError, Result};
pub use facades::{AdminDashboard, FacultyDashboard, ParentDashboard, ServiceFacade, StudentDashboard};
