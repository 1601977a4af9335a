//! Administrator dashboard: own profile, user directory, platform counters, activity.

use shared::dto::{ActionReceipt, ActivityEntry, AdminSummary, NewAnnouncement, Role, UserProfile, UserRecord};
use shared::utils::percentage;

use super::{DashboardSpec, SectionFallback, SectionSpec, ServiceFacade};
use crate::app::model::{DashboardModel, DerivedMetrics};
use crate::core::error::RequestError;
use crate::services::api::{Endpoint, EndpointCategory, RequestOptions};

pub const PROFILE: &str = "profile";
pub const USERS: &str = "users";
pub const SUMMARY: &str = "summary";
pub const ACTIVITY: &str = "activity";

/// Most recent entries shown in the activity feed
pub const ACTIVITY_LIMIT: usize = 20;

pub fn spec() -> DashboardSpec {
    DashboardSpec::new(Role::Admin)
        .section(SectionSpec::new(
            PROFILE,
            Endpoint::get("/api/admin/profile", EndpointCategory::AdminProfile),
            SectionFallback::Empty,
        ))
        .section(SectionSpec::new(
            USERS,
            Endpoint::get("/api/admin/users", EndpointCategory::UserDirectory),
            SectionFallback::Empty,
        ))
        .section(SectionSpec::new(
            SUMMARY,
            Endpoint::get("/api/admin/summary", EndpointCategory::AdminSummary),
            SectionFallback::Empty,
        ))
        .section(
            SectionSpec::new(
                ACTIVITY,
                Endpoint::get("/api/admin/activity", EndpointCategory::ActivityFeed),
                SectionFallback::Empty,
            )
            .with_options(RequestOptions::default().query("limit", ACTIVITY_LIMIT)),
        )
        .derive_with(derive)
}

fn derive(model: &DashboardModel) -> DerivedMetrics {
    let users: Vec<UserRecord> = model.section(USERS);
    let summary: AdminSummary = model.section(SUMMARY);
    let activity: Vec<ActivityEntry> = model.section(ACTIVITY);

    let mut derived = DerivedMetrics::new();
    derived.insert("listed_users".into(), users.len() as f64);
    derived.insert(
        "student_share_pct".into(),
        percentage(summary.students as f64, summary.users as f64),
    );
    derived.insert(
        "faculty_share_pct".into(),
        percentage(summary.faculty as f64, summary.users as f64),
    );
    derived.insert("activity_count".into(), activity.len() as f64);
    derived
}

#[derive(Clone)]
pub struct AdminDashboard {
    facade: ServiceFacade,
}

impl AdminDashboard {
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

    pub async fn users(&self) -> Vec<UserRecord> {
        self.facade.section(USERS).await
    }

    pub async fn summary(&self) -> AdminSummary {
        self.facade.section(SUMMARY).await
    }

    pub async fn activity(&self) -> Vec<ActivityEntry> {
        self.facade.section(ACTIVITY).await
    }

    pub async fn post_announcement(
        &self,
        announcement: &NewAnnouncement,
    ) -> Result<ActionReceipt, RequestError> {
        self.facade
            .mutate(&Endpoint::post("/api/admin/announcements"), announcement)
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

    fn session(transport: Arc<ScriptedTransport>, credentials: CredentialStore) -> Session {
        Session::with_parts(ClientConfig::default(), transport, credentials)
    }

    fn script_live(transport: &ScriptedTransport) {
        transport.set(
            "/api/admin/profile",
            Reply::json(json!({"id": "adm-1", "name": "Grace Hopper", "email": "grace@school.test", "role": "admin"})),
        );
        transport.set(
            "/api/admin/users",
            Reply::json(json!([
                {"id": "adm-1", "name": "Grace Hopper", "email": "grace@school.test", "role": "admin", "status": "active"},
                {"id": "stu-1", "name": "Alan Turing", "email": "alan@school.test", "role": "student", "status": "pending"}
            ])),
        );
        transport.set(
            "/api/admin/summary",
            Reply::json(json!({
                "users": 10, "faculty": 2, "students": 7, "admins": 1,
                "courses": 4, "departments": 2, "active_sessions": 3
            })),
        );
        transport.set(
            "/api/admin/activity",
            Reply::json(json!([{"id": "a1", "actor": "Grace Hopper", "action": "created course", "at": "2024-09-01T10:00:00Z"}])),
        );
    }

    #[tokio::test]
    async fn test_live_dashboard_is_populated() {
        let transport = Arc::new(ScriptedTransport::new());
        script_live(&transport);
        let model = session(transport.clone(), CredentialStore::in_memory())
            .admin()
            .load_dashboard()
            .await;

        assert_eq!(model.status, LoadStatus::Populated);
        assert_eq!(model.metric("listed_users"), 2.0);
        assert_eq!(model.metric("student_share_pct"), 70.0);
        assert_eq!(model.metric("faculty_share_pct"), 20.0);
        assert_eq!(model.metric("activity_count"), 1.0);
        let profile: UserProfile = model.section(PROFILE);
        assert_eq!(profile.name, "Grace Hopper");

        let activity_request = transport
            .requests()
            .into_iter()
            .find(|r| r.path == "/api/admin/activity")
            .unwrap();
        assert_eq!(activity_request.query, vec![("limit".to_string(), "20".to_string())]);
    }

    #[tokio::test]
    async fn test_undecodable_bodies_fall_back_without_demo() {
        let transport = Arc::new(ScriptedTransport::new());
        script_live(&transport);
        transport.set("/api/admin/summary", Reply::json(json!({"unexpected": true})));
        transport.set("/api/admin/users", Reply::json(json!([1, 2, 3])));
        let session = session(transport, CredentialStore::in_memory());

        let model = session.admin().load_dashboard().await;

        assert!(!session.is_demo());
        assert_eq!(model.status, LoadStatus::PartiallyPopulated);
        let mut fallbacks = model.fallbacks();
        fallbacks.sort_by_key(|(name, _)| *name);
        assert_eq!(
            fallbacks,
            vec![(SUMMARY, FailureKind::ServerError), (USERS, FailureKind::ServerError)]
        );
        assert_eq!(model.payload(USERS), Some(&json!([])));
        let summary: AdminSummary = model.section(SUMMARY);
        assert_eq!(summary, AdminSummary::default());
        assert_eq!(model.source(ACTIVITY), Some(SectionSource::Live));
    }

    #[tokio::test]
    async fn test_unreachable_backend_switches_to_demo_summary() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.set("/api/admin/summary", Reply::Unreachable);
        let session = session(transport.clone(), CredentialStore::in_memory());
        let admin = session.admin();

        let summary = admin.summary().await;
        assert_eq!(summary.users, 156);
        assert_eq!(summary.faculty, 23);
        assert_eq!(summary.students, 125);
        assert!(session.is_demo());
        assert_eq!(transport.total_calls(), 1);

        // Sticky: nothing else reaches the network
        let model = admin.load_dashboard().await;
        assert_eq!(transport.total_calls(), 1);
        assert_eq!(model.status, LoadStatus::FullyDemo);
        assert_eq!(model.source(USERS), Some(SectionSource::Demo));
        let users: Vec<UserRecord> = model.section(USERS);
        assert_eq!(users.len() as u32, summary.users);
        assert_eq!(model.metric("listed_users"), 156.0);
    }

    #[tokio::test]
    async fn test_unauthorized_clears_credential_and_falls_back_one_section() {
        let transport = Arc::new(ScriptedTransport::new());
        script_live(&transport);
        transport.set("/api/admin/summary", Reply::status(401));
        let credentials = CredentialStore::in_memory();
        credentials.set("expired-token").unwrap();
        let session = session(transport.clone(), credentials.clone());

        let model = session.admin().load_dashboard().await;

        assert!(credentials.get().is_none());
        assert!(!session.is_demo());
        assert_eq!(model.status, LoadStatus::PartiallyPopulated);
        assert_eq!(
            model.fallbacks(),
            vec![(SUMMARY, FailureKind::Unauthorized)]
        );
        let summary: AdminSummary = model.section(SUMMARY);
        assert_eq!(summary, AdminSummary::default());
        assert_eq!(model.source(USERS), Some(SectionSource::Live));
        // Zeroed counters: shares are 0, not NaN
        assert_eq!(model.metric("student_share_pct"), 0.0);
        assert_eq!(model.metric("listed_users"), 2.0);

        // Demo mode stays off, so the next load still hits the backend
        let before = transport.total_calls();
        session.admin().load_dashboard().await;
        assert_eq!(transport.total_calls(), before + 4);
    }

    #[tokio::test]
    async fn test_post_announcement_returns_receipt() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.set(
            "/api/admin/announcements",
            Reply::json(json!({"id": "ann-9", "message": "Announcement published"})),
        );
        let admin = session(transport.clone(), CredentialStore::in_memory()).admin();

        let receipt = admin
            .post_announcement(&NewAnnouncement {
                title: "Snow day".into(),
                body: "Campus closed".into(),
                course_code: None,
            })
            .await
            .unwrap();

        assert_eq!(receipt.id, "ann-9");
        let sent = transport.requests();
        assert_eq!(sent[0].method, crate::services::api::Method::Post);
        assert_eq!(sent[0].body.as_ref().unwrap()["title"], "Snow day");
    }
}
