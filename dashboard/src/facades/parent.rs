//! Parent dashboard: linked children, their grades, and school events.

use shared::dto::{ActionReceipt, ChildRecord, EventAcknowledgement, EventItem, GradeRecord, Role};

use super::{average_score_pct, upcoming_count, DashboardSpec, SectionFallback, SectionSpec, ServiceFacade};
use crate::app::model::{DashboardModel, DerivedMetrics};
use crate::core::error::RequestError;
use crate::services::api::{Endpoint, EndpointCategory};

pub const CHILDREN: &str = "children";
pub const GRADES: &str = "grades";
pub const EVENTS: &str = "events";

pub fn spec() -> DashboardSpec {
    DashboardSpec::new(Role::Parent)
        .section(SectionSpec::new(
            CHILDREN,
            Endpoint::get("/api/parent/children", EndpointCategory::ChildList),
            SectionFallback::Empty,
        ))
        .section(SectionSpec::new(
            GRADES,
            Endpoint::get("/api/parent/grades", EndpointCategory::ChildGrades),
            SectionFallback::Empty,
        ))
        .section(SectionSpec::new(
            EVENTS,
            Endpoint::get("/api/parent/events", EndpointCategory::ParentEvents),
            SectionFallback::Empty,
        ))
        .derive_with(derive)
}

fn derive(model: &DashboardModel) -> DerivedMetrics {
    let children: Vec<ChildRecord> = model.section(CHILDREN);
    let grades: Vec<GradeRecord> = model.section(GRADES);
    let events: Vec<EventItem> = model.section(EVENTS);

    let mut derived = DerivedMetrics::new();
    derived.insert("child_count".into(), children.len() as f64);
    derived.insert("graded_items".into(), grades.len() as f64);
    derived.insert("average_score_pct".into(), average_score_pct(&grades));
    derived.insert("upcoming_events".into(), upcoming_count(&events) as f64);
    derived
}

/// Typed entry points for the parent dashboard
#[derive(Clone)]
pub struct ParentDashboard {
    facade: ServiceFacade,
}

impl ParentDashboard {
    pub fn new(facade: ServiceFacade) -> Self {
        Self { facade }
    }

    pub fn facade(&self) -> &ServiceFacade {
        &self.facade
    }

    pub async fn load_dashboard(&self) -> DashboardModel {
        self.facade.load_dashboard().await
    }

    pub async fn children(&self) -> Vec<ChildRecord> {
        self.facade.section(CHILDREN).await
    }

    pub async fn grades(&self) -> Vec<GradeRecord> {
        self.facade.section(GRADES).await
    }

    pub async fn events(&self) -> Vec<EventItem> {
        self.facade.section(EVENTS).await
    }

    /// Confirm a child's attendance at a school event.
    pub async fn acknowledge_event(
        &self,
        acknowledgement: &EventAcknowledgement,
    ) -> Result<ActionReceipt, RequestError> {
        self.facade
            .mutate(&Endpoint::post("/api/parent/events/acknowledge"), acknowledgement)
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
    async fn test_grades_server_error_falls_back_to_empty_list_only() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.set(
            "/api/parent/children",
            Reply::json(json!([{
                "id": "stu-001", "name": "Ada Lovelace", "grade_level": 10,
                "homeroom": "Room 4", "attendance_rate": 97.5
            }])),
        );
        transport.set("/api/parent/grades", Reply::status(500));
        transport.set(
            "/api/parent/events",
            Reply::json(json!([{
                "id": "ev-1", "title": "Open day", "category": "event", "date": "2099-05-01"
            }])),
        );
        let parent = session(transport.clone()).parent();

        let model = parent.load_dashboard().await;

        let children: Vec<ChildRecord> = model.section(CHILDREN);
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].name, "Ada Lovelace");
        assert_eq!(model.payload(GRADES), Some(&json!([])));
        assert_eq!(
            model.source(GRADES),
            Some(SectionSource::Fallback { kind: FailureKind::ServerError })
        );
        let events: Vec<EventItem> = model.section(EVENTS);
        assert_eq!(events[0].title, "Open day");
        assert_eq!(model.status, LoadStatus::PartiallyPopulated);

        assert_eq!(model.metric("child_count"), 1.0);
        assert_eq!(model.metric("graded_items"), 0.0);
        assert_eq!(model.metric("average_score_pct"), 0.0);
        assert_eq!(model.metric("upcoming_events"), 1.0);
        assert_eq!(transport.total_calls(), 3);
    }

    #[tokio::test]
    async fn test_typed_entry_points() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.set(
            "/api/parent/grades",
            Reply::json(json!([{
                "student_id": "stu-001", "student_name": "Ada", "course_code": "MAT100",
                "assessment": "Quiz", "score": 18.0, "max_score": 20.0, "letter": "A"
            }])),
        );
        transport.set("/api/parent/events", Reply::Timeout);
        let parent = session(transport).parent();

        let grades = parent.grades().await;
        assert_eq!(grades.len(), 1);
        assert_eq!(grades[0].score, 18.0);
        assert!(parent.events().await.is_empty());
        // 404 for children: falls back, still a list
        assert!(parent.children().await.is_empty());
    }

    #[tokio::test]
    async fn test_acknowledge_event_failure_is_surfaced() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.set("/api/parent/events/acknowledge", Reply::status(503));
        let parent = session(transport).parent();

        let err = parent
            .acknowledge_event(&EventAcknowledgement {
                event_id: "ev-1".into(),
                child_id: "stu-001".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind, FailureKind::ServerError);
        assert_eq!(err.status, Some(503));
    }

    #[tokio::test]
    async fn test_demo_mode_dashboard_is_consistent() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.set("/api/parent/children", Reply::Unreachable);
        let session = session(transport);
        let model = session.parent().load_dashboard().await;

        assert!(session.is_demo());
        assert_eq!(model.status, LoadStatus::FullyDemo);
        let children: Vec<ChildRecord> = model.section(CHILDREN);
        let grades: Vec<GradeRecord> = model.section(GRADES);
        assert_eq!(children.len(), 2);
        assert!(grades.iter().all(|g| children.iter().any(|c| c.id == g.student_id)));
        assert_eq!(model.metric("graded_items"), grades.len() as f64);
    }

    #[tokio::test]
    async fn test_siblings_in_flight_when_demo_flips_resolve_from_demo() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.set("/api/parent/children", Reply::Unreachable.after(Duration::from_millis(20)));
        transport.set(
            "/api/parent/grades",
            Reply::json(json!([{
                "student_id": "stu-live", "student_name": "Live", "course_code": "LIVE100",
                "assessment": "Quiz", "score": 1.0, "max_score": 2.0, "letter": "F"
            }]))
            .after(Duration::from_millis(60)),
        );
        transport.set(
            "/api/parent/events",
            Reply::json(json!([])).after(Duration::from_millis(60)),
        );
        let session = session(transport.clone());

        let model = session.parent().load_dashboard().await;

        // All three requests were on the wire before the flip
        assert_eq!(transport.total_calls(), 3);
        assert!(session.is_demo());
        assert_eq!(model.status, LoadStatus::FullyDemo);
        for name in [CHILDREN, GRADES, EVENTS] {
            assert_eq!(model.source(name), Some(SectionSource::Demo), "{}", name);
        }
        let children: Vec<ChildRecord> = model.section(CHILDREN);
        let grades: Vec<GradeRecord> = model.section(GRADES);
        assert!(!grades.is_empty());
        assert!(grades.iter().all(|g| children.iter().any(|c| c.id == g.student_id)));
    }
}
