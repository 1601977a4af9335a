//! # Aggregation Orchestrator
//!
//! Fans out every request a dashboard declares, waits for all of them to settle, merges
//! each outcome with its section's fallback, and only then derives aggregates.
//!
//! ```text
//! DashboardSpec ──► send(section 1) ──┐
//!               ├─► send(section 2) ──┼─► merge (fallbacks) ─► DashboardModel ─► derive
//!               └─► send(section n) ──┘
//! ```
//!
//! There is no orchestrator-level timeout. A slow section delays the merge but never
//! blocks its siblings from completing; a failed one never cancels them.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures::future::join_all;
use tracing::Instrument;
use uuid::Uuid;

use crate::app::model::{DashboardModel, SectionResult, SectionSource};
use crate::facades::{DashboardSpec, SectionSpec};
use crate::services::api::{PayloadSource, RequestClient, RequestOutcome};

#[derive(Clone)]
pub struct AggregationOrchestrator {
    client: Arc<RequestClient>,
    generation: Arc<AtomicU64>,
}

impl AggregationOrchestrator {
    pub fn new(client: Arc<RequestClient>) -> Self {
        Self {
            client,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn client(&self) -> &RequestClient {
        &self.client
    }

    /// Load every declared section concurrently and merge into one model.
    pub async fn load_dashboard(&self, spec: &DashboardSpec) -> DashboardModel {
        let generation = self.generation.fetch_add(1, Ordering::Relaxed) + 1;
        let load_id = Uuid::new_v4();
        let span = tracing::info_span!("dashboard_load", role = %spec.role, %load_id, generation);

        async move {
            let start = std::time::Instant::now();
            tracing::debug!(sections = spec.sections.len(), "Fan-out started");

            let outcomes = join_all(
                spec.sections
                    .iter()
                    .map(|section| self.client.send(&section.endpoint, section.options.clone())),
            )
            .await;

            let sections: BTreeMap<String, SectionResult> = spec
                .sections
                .iter()
                .zip(outcomes)
                .map(|(section, outcome)| (section.name.to_string(), self.merge(section, outcome)))
                .collect();

            let mut model = DashboardModel::new(
                spec.role,
                load_id,
                generation,
                sections,
                self.client.demo_mode().is_active(),
            );
            // Aggregates see only the merged model, fallbacks included
            let derived = (spec.derive)(&model);
            model.set_derived(derived);

            tracing::info!(
                status = ?model.status,
                fallbacks = model.fallbacks().len(),
                duration_ms = start.elapsed().as_millis(),
                "Dashboard loaded"
            );
            model
        }
        .instrument(span)
        .await
    }

    /// Resolve a single declared section. `None` if the spec doesn't declare `name`.
    pub async fn load_section(&self, spec: &DashboardSpec, name: &str) -> Option<SectionResult> {
        let section = spec.find(name)?;
        let outcome = self
            .client
            .send(&section.endpoint, section.options.clone())
            .await;
        Some(self.merge(section, outcome))
    }

    fn merge(&self, section: &SectionSpec, outcome: RequestOutcome) -> SectionResult {
        match outcome {
            RequestOutcome::Success(payload) => SectionResult {
                payload: payload.data,
                source: match payload.source {
                    PayloadSource::Network => SectionSource::Live,
                    PayloadSource::Demo => SectionSource::Demo,
                },
            },
            RequestOutcome::Failure(kind) => {
                tracing::info!(
                    section = section.name,
                    kind = kind.as_str(),
                    "SectionFallbackUsed"
                );
                SectionResult {
                    payload: section
                        .fallback
                        .resolve(&section.endpoint, self.client.demo_data()),
                    source: SectionSource::Fallback { kind },
                }
            }
        }
    }
}
