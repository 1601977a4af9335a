//! Student dashboard: profile, enrolled courses, grades, announcements.

use shared::dto::{ActionReceipt, Announcement, AssignmentSubmission, Course, GradeRecord, Role, UserProfile};

use super::{average_score_pct, DashboardSpec, SectionFallback, SectionSpec, ServiceFacade};
use crate::app::model::{DashboardModel, DerivedMetrics};
use crate::core::error::RequestError;
use crate::services::api::{Endpoint, EndpointCategory};

pub const PROFILE: &str = "profile";
pub const COURSES: &str = "courses";
pub const GRADES: &str = "grades";
pub const ANNOUNCEMENTS: &str = "announcements";

pub fn spec() -> DashboardSpec {
    DashboardSpec::new(Role::Student)
        .section(SectionSpec::new(
            PROFILE,
            Endpoint::get("/api/student/profile", EndpointCategory::StudentProfile),
            SectionFallback::Empty,
        ))
        .section(SectionSpec::new(
            COURSES,
            Endpoint::get("/api/student/courses", EndpointCategory::EnrolledCourses),
            SectionFallback::Empty,
        ))
        .section(SectionSpec::new(
            GRADES,
            Endpoint::get("/api/student/grades", EndpointCategory::StudentGrades),
            SectionFallback::Empty,
        ))
        .section(SectionSpec::new(
            ANNOUNCEMENTS,
            Endpoint::get("/api/student/announcements", EndpointCategory::Announcements),
            SectionFallback::Demo,
        ))
        .derive_with(derive)
}

fn derive(model: &DashboardModel) -> DerivedMetrics {
    let courses: Vec<Course> = model.section(COURSES);
    let grades: Vec<GradeRecord> = model.section(GRADES);
    let announcements: Vec<Announcement> = model.section(ANNOUNCEMENTS);

    let credits: u32 = courses.iter().map(|c| c.credits as u32).sum();

    let mut derived = DerivedMetrics::new();
    derived.insert("enrolled_credits".into(), credits as f64);
    derived.insert("course_count".into(), courses.len() as f64);
    derived.insert("average_score_pct".into(), average_score_pct(&grades));
    derived.insert("announcement_count".into(), announcements.len() as f64);
    derived
}

#[derive(Clone)]
pub struct StudentDashboard {
    facade: ServiceFacade,
}

impl StudentDashboard {
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

    pub async fn grades(&self) -> Vec<GradeRecord> {
        self.facade.section(GRADES).await
    }

    pub async fn announcements(&self) -> Vec<Announcement> {
        self.facade.section(ANNOUNCEMENTS).await
    }

    pub async fn submit_assignment(
        &self,
        submission: &AssignmentSubmission,
    ) -> Result<ActionReceipt, RequestError> {
        self.facade
            .mutate(&Endpoint::post("/api/student/assignments"), submission)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::model::{LoadStatus, SectionSource};
    use crate::app::session::Session;
    use crate::config::ClientConfig;
    use crate::core::error::FailureKind;
    use crate::services::api::CredentialStore;
    use crate::testing::{Reply, ScriptedTransport};
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;

    fn session(transport: Arc<ScriptedTransport>) -> Session {
        Session::with_parts(ClientConfig::default(), transport, CredentialStore::in_memory())
    }

    #[tokio::test]
    async fn test_live_dashboard_metrics() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.set(
            "/api/student/profile",
            Reply::json(json!({"id": "stu-1", "name": "Ada", "email": "ada@school.test", "role": "student"})),
        );
        transport.set(
            "/api/student/courses",
            Reply::json(json!([
                {"id": "c1", "code": "MAT100", "title": "Algebra", "instructor": "Dr. Noether", "enrolled": 20, "capacity": 30, "credits": 4},
                {"id": "c2", "code": "HIS100", "title": "History", "instructor": "Dr. Tuchman", "enrolled": 25, "capacity": 30, "credits": 3}
            ])),
        );
        transport.set(
            "/api/student/grades",
            Reply::json(json!([
                {"student_id": "stu-1", "student_name": "Ada", "course_code": "MAT100", "assessment": "Quiz", "score": 9.0, "max_score": 10.0, "letter": "A"},
                {"student_id": "stu-1", "student_name": "Ada", "course_code": "HIS100", "assessment": "Essay", "score": 35.0, "max_score": 50.0, "letter": "C"}
            ])),
        );
        transport.set("/api/student/announcements", Reply::json(json!([])));

        let model = session(transport).student().load_dashboard().await;

        assert_eq!(model.status, LoadStatus::Populated);
        assert_eq!(model.metric("enrolled_credits"), 7.0);
        assert_eq!(model.metric("course_count"), 2.0);
        assert_eq!(model.metric("average_score_pct"), 80.0);
        assert_eq!(model.metric("announcement_count"), 0.0);
    }

    #[tokio::test]
    async fn test_malformed_grades_fall_back_and_announcements_use_samples() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.set("/api/student/grades", Reply::json(json!({"unexpected": true})));
        transport.set("/api/student/announcements", Reply::status(500));
        let student = session(transport).student();

        let model = student.load_dashboard().await;

        assert_eq!(model.payload(GRADES), Some(&json!([])));
        assert_eq!(
            model.source(GRADES),
            Some(SectionSource::Fallback { kind: FailureKind::ServerError })
        );
        let announcements: Vec<Announcement> = model.section(ANNOUNCEMENTS);
        assert!(!announcements.is_empty());
        assert_eq!(model.metric("announcement_count"), announcements.len() as f64);
        assert_eq!(model.metric("average_score_pct"), 0.0);
    }

    #[tokio::test]
    async fn test_demo_grades_match_enrolled_courses() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.set("/api/student/profile", Reply::Unreachable);
        let student = session(transport).student();
        let model = student.load_dashboard().await;

        assert_eq!(model.status, LoadStatus::FullyDemo);
        let courses: Vec<Course> = model.section(COURSES);
        let grades: Vec<GradeRecord> = model.section(GRADES);
        assert!(!grades.is_empty());
        assert!(grades.iter().all(|g| courses.iter().any(|c| c.code == g.course_code)));
    }

    #[tokio::test]
    async fn test_submit_assignment_server_error_detail() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.set(
            "/api/student/assignments",
            Reply::Json {
                status: 422,
                body: json!({"error": "deadline passed"}),
            },
        );
        let student = session(transport).student();

        let err = student
            .submit_assignment(&AssignmentSubmission {
                course_code: "MAT100".into(),
                assignment: "Problem set 3".into(),
                content: "answers".into(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.kind, FailureKind::ServerError);
        assert_eq!(err.detail.as_deref(), Some("deadline passed"));
    }

    #[tokio::test]
    async fn test_live_grades_in_flight_when_demo_flips_are_replaced() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.set("/api/student/profile", Reply::Unreachable.after(Duration::from_millis(20)));
        transport.set(
            "/api/student/grades",
            Reply::json(json!([{
                "student_id": "stu-1", "student_name": "Ada", "course_code": "LIVE100",
                "assessment": "Quiz", "score": 9.0, "max_score": 10.0, "letter": "A"
            }]))
            .after(Duration::from_millis(60)),
        );
        transport.set(
            "/api/student/courses",
            Reply::json(json!([])).after(Duration::from_millis(60)),
        );
        transport.set(
            "/api/student/announcements",
            Reply::json(json!([])).after(Duration::from_millis(60)),
        );
        let session = session(transport.clone());

        let model = session.student().load_dashboard().await;

        assert_eq!(transport.total_calls(), 4);
        assert_eq!(model.status, LoadStatus::FullyDemo);
        assert_eq!(model.source(GRADES), Some(SectionSource::Demo));
        assert_eq!(model.source(COURSES), Some(SectionSource::Demo));
        let courses: Vec<Course> = model.section(COURSES);
        let grades: Vec<GradeRecord> = model.section(GRADES);
        assert!(!grades.is_empty());
        assert!(grades.iter().all(|g| g.course_code != "LIVE100"));
        assert!(grades.iter().all(|g| courses.iter().any(|c| c.code == g.course_code)));
    }
}
