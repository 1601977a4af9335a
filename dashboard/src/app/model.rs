//! # Dashboard Model
//!
//! The merged, render-ready result of one dashboard load. Every declared section is
//! present; derived aggregates are computed from this model and nothing else.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use shared::dto::Role;
use uuid::Uuid;

use crate::core::error::FailureKind;

/// Derived aggregates keyed by metric name
pub type DerivedMetrics = BTreeMap<String, f64>;

/// Where a section's payload came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum SectionSource {
    /// Real backend data
    Live,
    /// Synthetic data served while the session is in demo mode
    Demo,
    /// Request failed; the facade's declared fallback was substituted
    Fallback { kind: FailureKind },
}

impl SectionSource {
    /// True for the `SectionFallbackUsed` annotation
    pub fn is_fallback(&self) -> bool {
        matches!(self, SectionSource::Fallback { .. })
    }
}

/// One merged section
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionResult {
    pub payload: Value,
    #[serde(flatten)]
    pub source: SectionSource,
}

impl SectionResult {
    /// Decode the payload, or `T::default()` if it doesn't fit `T`.
    pub fn decode<T>(&self, name: &str) -> T
    where
        T: DeserializeOwned + Default,
    {
        serde_json::from_value(self.payload.clone()).unwrap_or_else(|e| {
            tracing::warn!(section = name, error = %e, "Section payload does not decode, using default");
            T::default()
        })
    }
}

/// Completion status of a load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadStatus {
    /// Every section is live data
    Populated,
    /// At least one section fell back
    PartiallyPopulated,
    /// The session is in demo mode
    FullyDemo,
}

/// Render-ready dashboard
#[derive(Debug, Clone, Serialize)]
pub struct DashboardModel {
    pub role: Role,
    pub load_id: Uuid,
    pub generation: u64,
    pub loaded_at: DateTime<Utc>,
    pub status: LoadStatus,
    sections: BTreeMap<String, SectionResult>,
    derived: DerivedMetrics,
}

impl DashboardModel {
    pub(crate) fn new(
        role: Role,
        load_id: Uuid,
        generation: u64,
        sections: BTreeMap<String, SectionResult>,
        demo_mode: bool,
    ) -> Self {
        let status = if demo_mode {
            LoadStatus::FullyDemo
        } else if sections.values().all(|s| s.source == SectionSource::Live) {
            LoadStatus::Populated
        } else {
            LoadStatus::PartiallyPopulated
        };

        Self {
            role,
            load_id,
            generation,
            loaded_at: Utc::now(),
            status,
            sections,
            derived: DerivedMetrics::new(),
        }
    }

    pub(crate) fn set_derived(&mut self, derived: DerivedMetrics) {
        self.derived = derived;
    }

    pub fn get(&self, name: &str) -> Option<&SectionResult> {
        self.sections.get(name)
    }

    pub fn payload(&self, name: &str) -> Option<&Value> {
        self.sections.get(name).map(|s| &s.payload)
    }

    /// Typed view of a section. Missing or mistyped sections yield `T::default()`.
    pub fn section<T>(&self, name: &str) -> T
    where
        T: DeserializeOwned + Default,
    {
        self.sections
            .get(name)
            .map(|s| s.decode(name))
            .unwrap_or_default()
    }

    pub fn source(&self, name: &str) -> Option<SectionSource> {
        self.sections.get(name).map(|s| s.source)
    }

    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    pub fn sections(&self) -> &BTreeMap<String, SectionResult> {
        &self.sections
    }

    /// Sections that came from a fallback, with the failure that caused it
    pub fn fallbacks(&self) -> Vec<(&str, FailureKind)> {
        self.sections
            .iter()
            .filter_map(|(name, s)| match s.source {
                SectionSource::Fallback { kind } => Some((name.as_str(), kind)),
                _ => None,
            })
            .collect()
    }

    pub fn derived(&self) -> &DerivedMetrics {
        &self.derived
    }

    /// Derived metric, 0.0 when the facade didn't produce it
    pub fn metric(&self, name: &str) -> f64 {
        self.derived.get(name).copied().unwrap_or(0.0)
    }
}
