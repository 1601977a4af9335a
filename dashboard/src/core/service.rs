//! # Service Traits
//!
//! Traits for dependency injection at the two I/O seams of the client: the network
//! transport and the persisted slot storage. Production code plugs in
//! [`HttpTransport`](crate::services::api::HttpTransport) and
//! [`FileSlotStorage`](crate::services::api::FileSlotStorage); tests plug in scripted and
//! in-memory implementations.

use async_trait::async_trait;
use serde_json::Value;

use crate::services::api::credentials::Credential;
use crate::services::api::endpoint::Method;

/// One outgoing request as seen by a transport.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    /// Bearer credential to attach, if one is present
    pub bearer: Option<Credential>,
}

/// Raw answer from the backend: status plus JSON body (`Value::Null` when empty or not JSON).
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Value,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Failures where no usable HTTP response was received.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportFault {
    #[error("timed out: {0}")]
    Timeout(String),
    /// No connection to the backend at all
    #[error("unreachable: {0}")]
    Unreachable(String),
    /// Status line arrived but the body could not be read
    #[error("invalid response (HTTP {status}): {reason}")]
    InvalidResponse { status: u16, reason: String },
}

/// Network transport used by the request client.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute one request. HTTP error statuses are returned as `Ok`; only failures
    /// without a response are `Err`.
    async fn execute(&self, request: ApiRequest) -> Result<TransportResponse, TransportFault>;
}

/// Named-slot persisted storage (the client-side equivalent of local storage).
pub trait SlotStorage: Send + Sync {
    fn read(&self, slot: &str) -> Option<String>;
    fn write(&self, slot: &str, value: &str) -> std::io::Result<()>;
    fn remove(&self, slot: &str) -> std::io::Result<()>;
}
