//! # Demo Data Provider
//!
//! Synthesizes a schema-matching payload for any endpoint category when real data is
//! unavailable. Payloads are serialized from the same `shared` DTOs the backend uses, so
//! a demo payload and a live payload for the same category have identical shapes.
//!
//! The underlying [`DemoDataset`] is built lazily on first use and then shared by every
//! call, which keeps totals consistent with the lists they count.

pub mod dataset;

use once_cell::sync::OnceCell;
use serde::Serialize;
use serde_json::Value;

use crate::config::DEFAULT_DEMO_SEED;
use crate::services::api::endpoint::{EndpointCategory, PayloadShape};

pub use dataset::DemoDataset;

pub struct DemoDataProvider {
    seed: u64,
    dataset: OnceCell<DemoDataset>,
}

impl DemoDataProvider {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            dataset: OnceCell::new(),
        }
    }

    pub fn dataset(&self) -> &DemoDataset {
        self.dataset.get_or_init(|| {
            tracing::info!(seed = self.seed, "Generating demo dataset");
            DemoDataset::generate(self.seed)
        })
    }

    /// Synthetic payload for `category`, guaranteed to have `shape`.
    ///
    /// Categories without a generator fail closed to the empty value of `shape`.
    pub fn provide(&self, category: &EndpointCategory, shape: PayloadShape) -> Value {
        let ds = self.dataset();
        let value = match category {
            EndpointCategory::AdminProfile => to_value(ds.admin_profile()),
            EndpointCategory::AdminSummary => to_value(ds.admin_summary()),
            EndpointCategory::UserDirectory => to_value(ds.user_directory()),
            EndpointCategory::ActivityFeed => to_value(&ds.activity),
            EndpointCategory::FacultyProfile => to_value(ds.faculty_profile()),
            EndpointCategory::FacultySummary => to_value(ds.faculty_summary()),
            EndpointCategory::TaughtCourses => to_value(ds.taught_courses()),
            EndpointCategory::FacultySchedule => to_value(&ds.faculty_schedule),
            EndpointCategory::ChildList => to_value(&ds.children),
            EndpointCategory::ChildGrades => to_value(&ds.child_grades),
            EndpointCategory::ParentEvents => to_value(&ds.parent_events),
            EndpointCategory::StudentProfile => to_value(ds.student_profile()),
            EndpointCategory::EnrolledCourses => to_value(ds.enrolled_courses()),
            EndpointCategory::StudentGrades => to_value(&ds.student_grades),
            EndpointCategory::Announcements => to_value(&ds.announcements),
            EndpointCategory::Custom(name) => {
                tracing::warn!(category = %name, "No demo generator for category, using empty value");
                None
            }
        };

        match value {
            Some(v) if shape.matches(&v) => v,
            Some(_) => {
                tracing::warn!(?category, ?shape, "Demo payload shape mismatch, using empty value");
                shape.empty_value()
            }
            None => shape.empty_value(),
        }
    }
}

impl Default for DemoDataProvider {
    fn default() -> Self {
        Self::new(DEFAULT_DEMO_SEED)
    }
}

fn to_value<T: Serialize>(payload: T) -> Option<Value> {
    serde_json::to_value(payload)
        .map_err(|e| tracing::error!(error = %e, "Failed to serialize demo payload"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::dto::{AdminSummary, ChildRecord, Course, FacultySummary, GradeRecord, UserProfile, UserRecord};

    #[test]
    fn test_admin_summary_matches_reference_counts() {
        let provider = DemoDataProvider::default();
        let summary: AdminSummary = serde_json::from_value(
            provider.provide(&EndpointCategory::AdminSummary, PayloadShape::Summary),
        )
        .unwrap();
        assert_eq!(summary.users, 156);
        assert_eq!(summary.faculty, 23);
        assert_eq!(summary.students, 125);
    }

    #[test]
    fn test_every_category_decodes_into_its_dto() {
        let provider = DemoDataProvider::new(42);
        let get = |c: EndpointCategory| {
            let shape = c.shape();
            provider.provide(&c, shape)
        };

        let _: UserProfile = serde_json::from_value(get(EndpointCategory::AdminProfile)).unwrap();
        let _: UserProfile = serde_json::from_value(get(EndpointCategory::FacultyProfile)).unwrap();
        let _: UserProfile = serde_json::from_value(get(EndpointCategory::StudentProfile)).unwrap();
        let _: FacultySummary = serde_json::from_value(get(EndpointCategory::FacultySummary)).unwrap();
        let _: Vec<Course> = serde_json::from_value(get(EndpointCategory::TaughtCourses)).unwrap();
        let _: Vec<Course> = serde_json::from_value(get(EndpointCategory::EnrolledCourses)).unwrap();
        let _: Vec<ChildRecord> = serde_json::from_value(get(EndpointCategory::ChildList)).unwrap();
        let _: Vec<GradeRecord> = serde_json::from_value(get(EndpointCategory::ChildGrades)).unwrap();
        let _: Vec<GradeRecord> = serde_json::from_value(get(EndpointCategory::StudentGrades)).unwrap();

        let users: Vec<UserRecord> = serde_json::from_value(get(EndpointCategory::UserDirectory)).unwrap();
        let summary: AdminSummary = serde_json::from_value(get(EndpointCategory::AdminSummary)).unwrap();
        assert_eq!(summary.users as usize, users.len());
    }

    #[test]
    fn test_uncovered_category_fails_closed() {
        let provider = DemoDataProvider::default();
        let custom = EndpointCategory::Custom("library_loans".into());
        assert_eq!(provider.provide(&custom, PayloadShape::List), Value::Array(vec![]));
        assert_eq!(
            provider.provide(&custom, PayloadShape::Summary),
            Value::Object(Default::default())
        );
    }

    #[test]
    fn test_shape_mismatch_fails_closed() {
        let provider = DemoDataProvider::default();
        // Directory is a list; asking for a record yields an empty record, not a list
        let value = provider.provide(&EndpointCategory::UserDirectory, PayloadShape::Record);
        assert!(value.as_object().is_some_and(|m| m.is_empty()));
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let provider = DemoDataProvider::new(3);
        let a = provider.provide(&EndpointCategory::ChildGrades, PayloadShape::List);
        let b = provider.provide(&EndpointCategory::ChildGrades, PayloadShape::List);
        assert_eq!(a, b);
    }
}
