//! # Service Facades
//!
//! A dashboard is declared, not coded: a [`DashboardSpec`] lists the sections that make
//! up one role's dashboard, the endpoint behind each, and the fallback substituted when
//! that endpoint fails. One generic [`ServiceFacade`] runs any spec through the
//! orchestrator, and the per-role modules only add declarations plus typed accessors.
//!
//! ```text
//! facades/
//! ├── mod.rs      - SectionSpec, SectionFallback, DashboardSpec, ServiceFacade
//! ├── admin.rs    - profile, users, summary, activity
//! ├── faculty.rs  - profile, courses, summary, schedule
//! ├── parent.rs   - children, grades, events
//! └── student.rs  - profile, courses, grades, announcements
//! ```
//!
//! Presentation code calls facade entry points only; it never sees a `RequestOutcome`.

pub mod admin;
pub mod faculty;
pub mod parent;
pub mod student;

use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use shared::dto::{EventItem, GradeRecord, Role};
use shared::utils::{is_upcoming, percentage};

use crate::app::model::{DashboardModel, DerivedMetrics};
use crate::app::orchestrator::AggregationOrchestrator;
use crate::core::error::RequestError;
use crate::services::api::{Endpoint, RequestOptions};
use crate::services::demo::DemoDataProvider;

pub use admin::AdminDashboard;
pub use faculty::FacultyDashboard;
pub use parent::ParentDashboard;
pub use student::StudentDashboard;

/// Value substituted for a section whose request failed
#[derive(Debug, Clone, PartialEq)]
pub enum SectionFallback {
    /// Typed empty value for the endpoint's category (empty list, zeroed counters)
    Empty,
    /// Declared literal value; replaced by `Empty` if it doesn't fit the section's shape
    Value(Value),
    /// Synthetic payload from the demo data source
    Demo,
}

impl SectionFallback {
    /// Materialize the fallback for `endpoint`. Always has the endpoint's shape.
    pub fn resolve(&self, endpoint: &Endpoint, demo: &DemoDataProvider) -> Value {
        let empty = || {
            if endpoint.shape == endpoint.category.shape() {
                endpoint.category.empty_value()
            } else {
                endpoint.shape.empty_value()
            }
        };

        match self {
            SectionFallback::Empty => empty(),
            SectionFallback::Value(v) if endpoint.shape.matches(v) => v.clone(),
            SectionFallback::Value(_) => {
                tracing::warn!(path = %endpoint.path, "Declared fallback has the wrong shape, using empty value");
                empty()
            }
            SectionFallback::Demo => demo.provide(&endpoint.category, endpoint.shape),
        }
    }
}

/// One section of a dashboard
#[derive(Debug, Clone)]
pub struct SectionSpec {
    pub name: &'static str,
    pub endpoint: Endpoint,
    pub options: RequestOptions,
    pub fallback: SectionFallback,
}

impl SectionSpec {
    pub fn new(name: &'static str, endpoint: Endpoint, fallback: SectionFallback) -> Self {
        Self {
            name,
            endpoint,
            options: RequestOptions::default(),
            fallback,
        }
    }

    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }
}

/// Derives aggregates from a merged model
pub type DeriveFn = fn(&DashboardModel) -> DerivedMetrics;

fn no_derived_metrics(_: &DashboardModel) -> DerivedMetrics {
    DerivedMetrics::new()
}

/// Declarative description of one role's dashboard
#[derive(Debug, Clone)]
pub struct DashboardSpec {
    pub role: Role,
    pub sections: Vec<SectionSpec>,
    pub derive: DeriveFn,
    pub refresh_interval: Option<Duration>,
}

impl DashboardSpec {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            sections: Vec::new(),
            derive: no_derived_metrics,
            refresh_interval: None,
        }
    }

    pub fn section(mut self, section: SectionSpec) -> Self {
        self.sections.push(section);
        self
    }

    pub fn derive_with(mut self, derive: DeriveFn) -> Self {
        self.derive = derive;
        self
    }

    pub fn refresh_every(mut self, interval: Option<Duration>) -> Self {
        self.refresh_interval = interval;
        self
    }

    pub fn find(&self, name: &str) -> Option<&SectionSpec> {
        self.sections.iter().find(|s| s.name == name)
    }

    pub fn section_names(&self) -> Vec<&'static str> {
        self.sections.iter().map(|s| s.name).collect()
    }
}

/// Generic facade: runs a [`DashboardSpec`] through the orchestrator.
#[derive(Clone)]
pub struct ServiceFacade {
    spec: Arc<DashboardSpec>,
    orchestrator: AggregationOrchestrator,
}

impl ServiceFacade {
    pub fn new(spec: DashboardSpec, orchestrator: AggregationOrchestrator) -> Self {
        Self {
            spec: Arc::new(spec),
            orchestrator,
        }
    }

    pub fn spec(&self) -> &DashboardSpec {
        &self.spec
    }

    pub fn role(&self) -> Role {
        self.spec.role
    }

    pub fn orchestrator(&self) -> &AggregationOrchestrator {
        &self.orchestrator
    }

    /// Full fan-out for this dashboard.
    pub async fn load_dashboard(&self) -> DashboardModel {
        self.orchestrator.load_dashboard(&self.spec).await
    }

    /// Resolve one declared section with the same merge policy as a full load.
    ///
    /// Unknown section names yield `T::default()`.
    pub async fn section<T>(&self, name: &str) -> T
    where
        T: DeserializeOwned + Default,
    {
        match self.orchestrator.load_section(&self.spec, name).await {
            Some(result) => result.decode(name),
            None => {
                tracing::warn!(role = %self.spec.role, section = name, "Unknown section requested");
                T::default()
            }
        }
    }

    /// Single-endpoint write. Failures are returned, never defaulted.
    pub async fn mutate<B, R>(&self, endpoint: &Endpoint, body: &B) -> Result<R, RequestError>
    where
        B: Serialize,
        R: DeserializeOwned + Default,
    {
        let value = self.orchestrator.client().mutate(endpoint, body).await?;
        // Receipts are informational; an odd receipt body doesn't undo a successful write
        Ok(serde_json::from_value(value).unwrap_or_default())
    }
}

/// Mean of per-assessment score percentages, 0.0 for no grades.
pub(crate) fn average_score_pct(grades: &[GradeRecord]) -> f64 {
    if grades.is_empty() {
        return 0.0;
    }
    let total: f64 = grades.iter().map(|g| percentage(g.score, g.max_score)).sum();
    total / grades.len() as f64
}

/// Events dated today or later.
pub(crate) fn upcoming_count(events: &[EventItem]) -> usize {
    let today = Local::now().date_naive();
    events.iter().filter(|e| is_upcoming(&e.date, today)).count()
}
