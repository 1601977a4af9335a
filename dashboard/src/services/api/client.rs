//! # Request Client
//!
//! Issues one backend call, attaches the credential, classifies the result, and owns
//! demo-mode escalation.
//!
//! ## Outcome rules
//!
//! | Transport result | Read (`send`) | Write (`mutate`) |
//! |------------------|---------------|------------------|
//! | 2xx decoding into the category's DTO | `Success` | `Ok(body)` |
//! | 401 / 403 | invalidate credential, `Failure(Unauthorized)` | invalidate, `Err(Unauthorized)` |
//! | other status / undecodable or truncated body | `Failure(ServerError)` | `Err(ServerError)` |
//! | timeout | `Failure(Timeout)` | `Err(Timeout)` |
//! | unreachable | enable demo mode, `Success` from demo data | enable demo mode, `Err(NetworkUnreachable)` |
//! | demo mode already on | `Success` from demo data, no network | `Err(NetworkUnreachable)`, no network |
//! | demo mode switched on while in flight | `Success` from demo data | as received |
//!
//! `send` refuses mutating endpoints with `Failure(ServerError)` before touching the
//! network or the demo data: a write never resolves to a default.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use shared::dto::ErrorResponse;

use crate::core::error::{FailureKind, RequestError};
use crate::core::service::{ApiRequest, Transport, TransportFault, TransportResponse};
use crate::services::api::credentials::CredentialStore;
use crate::services::api::demo_mode::DemoModeState;
use crate::services::api::endpoint::Endpoint;
use crate::services::demo::DemoDataProvider;

/// Per-call options
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl RequestOptions {
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }
}

/// Where a successful payload came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadSource {
    Network,
    Demo,
}

/// Successful payload
#[derive(Debug, Clone, PartialEq)]
pub struct Payload {
    pub data: Value,
    pub source: PayloadSource,
}

/// Result of one read request
#[derive(Debug, Clone, PartialEq)]
pub enum RequestOutcome {
    Success(Payload),
    Failure(FailureKind),
}

impl RequestOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RequestOutcome::Success(_))
    }
}

/// Credential-bearing request wrapper shared by every facade of a session.
pub struct RequestClient {
    transport: Arc<dyn Transport>,
    credentials: CredentialStore,
    demo_mode: DemoModeState,
    demo_data: Arc<DemoDataProvider>,
    network_calls: AtomicU64,
}

impl RequestClient {
    pub fn new(
        transport: Arc<dyn Transport>,
        credentials: CredentialStore,
        demo_mode: DemoModeState,
        demo_data: Arc<DemoDataProvider>,
    ) -> Self {
        Self {
            transport,
            credentials,
            demo_mode,
            demo_data,
            network_calls: AtomicU64::new(0),
        }
    }

    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    pub fn demo_mode(&self) -> &DemoModeState {
        &self.demo_mode
    }

    pub fn demo_data(&self) -> &DemoDataProvider {
        &self.demo_data
    }

    /// Number of requests that actually reached the transport.
    pub fn network_calls(&self) -> u64 {
        self.network_calls.load(Ordering::Relaxed)
    }

    /// Issue a read request.
    #[tracing::instrument(skip(self, options), fields(method = endpoint.method.as_str(), path = %endpoint.path))]
    pub async fn send(&self, endpoint: &Endpoint, options: RequestOptions) -> RequestOutcome {
        if endpoint.method.is_mutating() {
            tracing::error!("Mutating endpoint passed to send; use mutate");
            return RequestOutcome::Failure(FailureKind::ServerError);
        }

        if self.demo_mode.is_active() {
            tracing::trace!("Demo mode active - skipping network");
            return self.demo_outcome(endpoint);
        }

        let start = std::time::Instant::now();
        let result = self.dispatch(endpoint, options).await;
        let duration_ms = start.elapsed().as_millis();

        // A sibling flipped demo mode while this one was in flight: keep the view on one dataset
        if self.demo_mode.is_active() && !matches!(result, Err(TransportFault::Unreachable(_))) {
            tracing::debug!(duration_ms, "Demo mode switched on mid-flight - resolving from demo data");
            return self.demo_outcome(endpoint);
        }

        match result {
            Ok(response) => match classify(&response, endpoint) {
                Ok(data) => {
                    tracing::debug!(duration_ms, "Request succeeded");
                    RequestOutcome::Success(Payload {
                        data,
                        source: PayloadSource::Network,
                    })
                }
                Err(kind) => {
                    if kind == FailureKind::Unauthorized {
                        self.credentials.invalidate();
                    }
                    tracing::warn!(status = response.status, kind = kind.as_str(), duration_ms, "Request failed");
                    RequestOutcome::Failure(kind)
                }
            },
            Err(TransportFault::Timeout(reason)) => {
                tracing::warn!(%reason, duration_ms, "Request timed out");
                RequestOutcome::Failure(FailureKind::Timeout)
            }
            Err(TransportFault::InvalidResponse { status, reason }) => {
                tracing::warn!(status, %reason, duration_ms, "Response body unreadable");
                RequestOutcome::Failure(FailureKind::ServerError)
            }
            Err(TransportFault::Unreachable(reason)) => {
                tracing::warn!(%reason, duration_ms, "Backend unreachable - resolving from demo data");
                self.demo_mode.activate();
                self.demo_outcome(endpoint)
            }
        }
    }

    /// Issue a mutating request. Every failure is returned to the caller.
    #[tracing::instrument(skip(self, body), fields(method = endpoint.method.as_str(), path = %endpoint.path))]
    pub async fn mutate<B: Serialize>(&self, endpoint: &Endpoint, body: &B) -> Result<Value, RequestError> {
        let fail = |kind: FailureKind, status: Option<u16>, detail: Option<String>| RequestError {
            kind,
            method: endpoint.method.as_str(),
            path: endpoint.path.clone(),
            status,
            detail,
        };

        if self.demo_mode.is_active() {
            tracing::warn!("Write attempted while in demo mode");
            return Err(fail(
                FailureKind::NetworkUnreachable,
                None,
                Some("backend unavailable (demo mode)".to_string()),
            ));
        }

        let body = serde_json::to_value(body)
            .map_err(|e| fail(FailureKind::ServerError, None, Some(format!("unserializable body: {}", e))))?;

        let options = RequestOptions {
            query: Vec::new(),
            body: Some(body),
        };

        match self.dispatch(endpoint, options).await {
            Ok(response) if response.is_success() => {
                tracing::info!(status = response.status, "Write succeeded");
                Ok(response.body)
            }
            Ok(response) => {
                let kind = classify_status(response.status);
                if kind == FailureKind::Unauthorized {
                    self.credentials.invalidate();
                }
                let detail = serde_json::from_value::<ErrorResponse>(response.body)
                    .ok()
                    .map(|e| e.error);
                tracing::warn!(status = response.status, kind = kind.as_str(), "Write failed");
                Err(fail(kind, Some(response.status), detail))
            }
            Err(TransportFault::Timeout(reason)) => {
                tracing::warn!(%reason, "Write timed out");
                Err(fail(FailureKind::Timeout, None, Some(reason)))
            }
            Err(TransportFault::InvalidResponse { status, reason }) => {
                tracing::warn!(status, %reason, "Write response unreadable");
                Err(fail(FailureKind::ServerError, Some(status), Some(reason)))
            }
            Err(TransportFault::Unreachable(reason)) => {
                tracing::warn!(%reason, "Write failed - backend unreachable");
                self.demo_mode.activate();
                Err(fail(FailureKind::NetworkUnreachable, None, Some(reason)))
            }
        }
    }

    async fn dispatch(
        &self,
        endpoint: &Endpoint,
        options: RequestOptions,
    ) -> Result<TransportResponse, TransportFault> {
        let request = ApiRequest {
            method: endpoint.method,
            path: endpoint.path.clone(),
            query: options.query,
            body: options.body,
            // Read fresh for every call; never reuse a credential across requests
            bearer: self.credentials.get(),
        };

        self.network_calls.fetch_add(1, Ordering::Relaxed);
        self.transport.execute(request).await
    }

    fn demo_outcome(&self, endpoint: &Endpoint) -> RequestOutcome {
        RequestOutcome::Success(Payload {
            data: self.demo_data.provide(&endpoint.category, endpoint.shape),
            source: PayloadSource::Demo,
        })
    }
}

fn classify_status(status: u16) -> FailureKind {
    match status {
        401 | 403 => FailureKind::Unauthorized,
        _ => FailureKind::ServerError,
    }
}

/// Map a received response to its payload or failure kind.
fn classify(response: &TransportResponse, endpoint: &Endpoint) -> Result<Value, FailureKind> {
    if !response.is_success() {
        return Err(classify_status(response.status));
    }
    if !endpoint.accepts(&response.body) {
        tracing::warn!(
            path = %endpoint.path,
            category = ?endpoint.category,
            "Response body does not decode into the expected payload"
        );
        return Err(FailureKind::ServerError);
    }
    Ok(response.body.clone())
}
