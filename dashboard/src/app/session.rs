//! # Session
//!
//! Wires one client session together: transport, credential store, demo mode flag,
//! demo data, request client, and orchestrator. Every facade created from a session
//! shares its demo mode flag and credential.

use std::sync::Arc;

use shared::dto::Role;

use crate::app::orchestrator::AggregationOrchestrator;
use crate::config::ClientConfig;
use crate::core::error::Result;
use crate::core::service::Transport;
use crate::facades::{self, AdminDashboard, FacultyDashboard, ParentDashboard, ServiceFacade, StudentDashboard};
use crate::services::api::{CredentialStore, DemoModeState, FileSlotStorage, HttpTransport, RequestClient};
use crate::services::demo::DemoDataProvider;

#[derive(Clone)]
pub struct Session {
    config: ClientConfig,
    client: Arc<RequestClient>,
    orchestrator: AggregationOrchestrator,
}

impl Session {
    /// Production session: HTTP transport, credential persisted in the state dir.
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let transport = Arc::new(HttpTransport::new(&config)?);
        let credentials = CredentialStore::new(Arc::new(FileSlotStorage::new(&config.state_dir)));
        Ok(Self::with_parts(config, transport, credentials))
    }

    /// Session over an arbitrary transport and credential store.
    pub fn with_parts(
        config: ClientConfig,
        transport: Arc<dyn Transport>,
        credentials: CredentialStore,
    ) -> Self {
        let demo_data = Arc::new(DemoDataProvider::new(config.demo_seed));
        let client = Arc::new(RequestClient::new(
            transport,
            credentials,
            DemoModeState::new(),
            demo_data,
        ));
        let orchestrator = AggregationOrchestrator::new(Arc::clone(&client));

        tracing::info!(api_url = %config.api_url, "Session started");

        Self {
            config,
            client,
            orchestrator,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn client(&self) -> &RequestClient {
        &self.client
    }

    pub fn orchestrator(&self) -> &AggregationOrchestrator {
        &self.orchestrator
    }

    pub fn is_demo(&self) -> bool {
        self.client.demo_mode().is_active()
    }

    /// Generic facade for a role's declared dashboard.
    pub fn facade(&self, role: Role) -> ServiceFacade {
        let interval = self.config.refresh_interval;
        let spec = match role {
            Role::Admin => facades::admin::spec(),
            Role::Faculty => facades::faculty::spec(),
            Role::Parent => facades::parent::spec(),
            Role::Student => facades::student::spec(),
        }
        .refresh_every(interval);
        ServiceFacade::new(spec, self.orchestrator.clone())
    }

    pub fn admin(&self) -> AdminDashboard {
        AdminDashboard::new(self.facade(Role::Admin))
    }

    pub fn faculty(&self) -> FacultyDashboard {
        FacultyDashboard::new(self.facade(Role::Faculty))
    }

    pub fn parent(&self) -> ParentDashboard {
        ParentDashboard::new(self.facade(Role::Parent))
    }

    pub fn student(&self) -> StudentDashboard {
        StudentDashboard::new(self.facade(Role::Student))
    }
}
