//! # Dashboard Aggregation
//!
//! - **[`session`]**: Wiring for one client session
//! - **[`orchestrator`]**: Concurrent fan-out and merge
//! - **[`model`]**: The merged, render-ready dashboard model
//! - **[`view`]**: Per-view load state, refresh timer, disposal

pub mod model;
pub mod orchestrator;
pub mod session;
pub mod view;

pub use model::{DashboardModel, DerivedMetrics, LoadStatus, SectionResult, SectionSource};
pub use orchestrator::AggregationOrchestrator;
pub use session::Session;
pub use view::{DashboardEvent, DashboardView, LoadState};
