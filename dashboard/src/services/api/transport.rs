//! # HTTP Transport
//!
//! reqwest-backed [`Transport`]. Turns a request into a status + JSON body, or into a
//! [`TransportFault`] when no usable response arrived.

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::core::error::{AppError, Result};
use crate::core::service::{ApiRequest, Transport, TransportFault, TransportResponse};
use crate::services::api::endpoint::Method;

/// HTTP transport for the backend API server.
///
/// Holds one connection pool for the lifetime of the session.
pub struct HttpTransport {
    client: Client,
    config: ClientConfig,
}

impl HttpTransport {
    /// Create a transport with the configured timeout.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::Http(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    fn builder(&self, request: &ApiRequest) -> reqwest::RequestBuilder {
        let url = self.config.url_for(&request.path);
        let builder = match request.method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
            Method::Put => self.client.put(url),
            Method::Delete => self.client.delete(url),
        };

        let builder = if request.query.is_empty() {
            builder
        } else {
            builder.query(&request.query)
        };

        let builder = match &request.bearer {
            Some(credential) => builder.header(AUTHORIZATION, credential.bearer_header()),
            None => builder,
        };

        match &request.body {
            Some(body) => builder.json(body),
            None => builder,
        }
    }
}

fn classify_send_error(e: &reqwest::Error) -> TransportFault {
    if e.is_timeout() {
        TransportFault::Timeout(e.to_string())
    } else {
        TransportFault::Unreachable(e.to_string())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[tracing::instrument(skip(self, request), fields(method = request.method.as_str(), path = %request.path))]
    async fn execute(&self, request: ApiRequest) -> std::result::Result<TransportResponse, TransportFault> {
        let start = std::time::Instant::now();

        let response = self.builder(&request).send().await.map_err(|e| {
            tracing::debug!(error = %e, duration_ms = start.elapsed().as_millis(), "Request got no response");
            classify_send_error(&e)
        })?;

        let status = response.status().as_u16();

        // The server answered; a broken body is a bad response, not a lost network
        let bytes = response.bytes().await.map_err(|e| {
            tracing::debug!(error = %e, status, "Failed to read response body");
            if e.is_timeout() {
                TransportFault::Timeout(e.to_string())
            } else {
                TransportFault::InvalidResponse {
                    status,
                    reason: e.to_string(),
                }
            }
        })?;

        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                tracing::warn!(error = %e, status, "Response body is not JSON");
                Value::Null
            })
        };

        tracing::debug!(
            status,
            duration_ms = start.elapsed().as_millis(),
            "Response received"
        );

        Ok(TransportResponse { status, body })
    }
}
