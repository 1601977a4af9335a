//! Scripted transport for tests.

use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use crate::core::service::{ApiRequest, Transport, TransportFault, TransportResponse};

/// Canned transport reply
#[derive(Debug, Clone)]
pub enum Reply {
    Json { status: u16, body: Value },
    Timeout,
    Unreachable,
    /// Status arrived, body read failed
    Truncated(u16),
    Delayed(Duration, Box<Reply>),
}

impl Reply {
    pub fn json(body: Value) -> Self {
        Reply::Json { status: 200, body }
    }

    pub fn status(status: u16) -> Self {
        Reply::Json {
            status,
            body: Value::Null,
        }
    }

    pub fn after(self, delay: Duration) -> Self {
        Reply::Delayed(delay, Box::new(self))
    }
}

/// Transport answering from per-path scripts. One-shot replies queued with `push` are
/// used before the standing reply set with `set`; unknown paths answer 404.
#[derive(Default)]
pub struct ScriptedTransport {
    standing: Mutex<HashMap<String, Reply>>,
    queued: Mutex<HashMap<String, VecDeque<Reply>>>,
    log: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, path: &str, reply: Reply) {
        self.standing.lock().insert(path.to_string(), reply);
    }

    pub fn push(&self, path: &str, reply: Reply) {
        self.queued
            .lock()
            .entry(path.to_string())
            .or_default()
            .push_back(reply);
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.log.lock().clone()
    }

    pub fn total_calls(&self) -> usize {
        self.log.lock().len()
    }

    pub fn calls_to(&self, path: &str) -> usize {
        self.log.lock().iter().filter(|r| r.path == path).count()
    }

    fn next_reply(&self, path: &str) -> Reply {
        if let Some(reply) = self.queued.lock().get_mut(path).and_then(VecDeque::pop_front) {
            return reply;
        }
        self.standing
            .lock()
            .get(path)
            .cloned()
            .unwrap_or_else(|| Reply::status(404))
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(&self, request: ApiRequest) -> Result<TransportResponse, TransportFault> {
        let mut reply = self.next_reply(&request.path);
        let path = request.path.clone();
        self.log.lock().push(request);

        loop {
            match reply {
                Reply::Delayed(delay, inner) => {
                    tokio::time::sleep(delay).await;
                    reply = *inner;
                }
                Reply::Json { status, body } => return Ok(TransportResponse { status, body }),
                Reply::Timeout => return Err(TransportFault::Timeout(path)),
                Reply::Unreachable => return Err(TransportFault::Unreachable(path)),
                Reply::Truncated(status) => {
                    return Err(TransportFault::InvalidResponse {
                        status,
                        reason: format!("{} closed mid-body", path),
                    })
                }
            }
        }
    }
}
