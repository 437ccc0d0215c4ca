//! A transport that replays canned responses and records what it was sent.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::Method;
use secrecy::ExposeSecret;
use serde::Serialize;
use serde_json::{Value, json};

use super::{ApiRequest, RawResponse, RequestBody, Transport};
use crate::error::ClientError;

/// What a request looked like when it reached the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
    pub bearer: Option<String>,
}

#[derive(Debug, Clone)]
enum Scripted {
    Respond(RawResponse),
    NetworkDown,
    TimedOut,
}

type SendHook = Arc<dyn Fn(&RecordedRequest) + Send + Sync>;

#[derive(Default)]
struct ScriptState {
    queue: VecDeque<Scripted>,
    requests: Vec<RecordedRequest>,
    hook: Option<SendHook>,
}

/// Replays queued responses in order. An exhausted script behaves like an
/// unreachable server.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    state: Arc<Mutex<ScriptState>>,
}

impl std::fmt::Debug for ScriptedTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("ScriptedTransport")
            .field("queued", &state.queue.len())
            .field("sent", &state.requests.len())
            .finish_non_exhaustive()
    }
}

impl ScriptedTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, item: Scripted) -> &Self {
        self.state.lock().queue.push_back(item);
        self
    }

    /// Queue a raw response.
    pub fn respond_raw(&self, status: u16, body: impl Into<String>) -> &Self {
        self.push(Scripted::Respond(RawResponse::new(status, body)))
    }

    /// Queue an envelope `{code, message, data}` with the given HTTP status.
    pub fn respond_envelope<T: Serialize>(
        &self,
        status: u16,
        code: i32,
        message: &str,
        data: T,
    ) -> &Self {
        let data = serde_json::to_value(data).unwrap_or(Value::Null);
        let body = json!({ "code": code, "message": message, "data": data });
        self.respond_raw(status, body.to_string())
    }

    /// Queue an HTTP 200 response with envelope code 200.
    pub fn respond_ok<T: Serialize>(&self, data: T) -> &Self {
        self.respond_envelope(200, 200, "", data)
    }

    /// Queue an HTTP 200 response with envelope code 201.
    pub fn respond_created<T: Serialize>(&self, data: T) -> &Self {
        self.respond_envelope(200, 201, "", data)
    }

    /// Queue a business error: HTTP 400 carrying a five-digit code.
    pub fn respond_business_error(&self, code: i32, message: &str) -> &Self {
        self.respond_envelope(400, code, message, Value::Null)
    }

    /// Queue a connection failure.
    pub fn fail_network(&self) -> &Self {
        self.push(Scripted::NetworkDown)
    }

    /// Queue a timeout.
    pub fn fail_timeout(&self) -> &Self {
        self.push(Scripted::TimedOut)
    }

    /// Run `hook` for every request as it is sent, before the response is
    /// returned.
    pub fn on_send(&self, hook: impl Fn(&RecordedRequest) + Send + Sync + 'static) {
        self.state.lock().hook = Some(Arc::new(hook));
    }

    /// Every request sent so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().requests.clone()
    }

    /// The most recent request.
    #[must_use]
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.state.lock().requests.last().cloned()
    }

    /// Number of responses not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.state.lock().queue.len()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ClientError> {
        let recorded = RecordedRequest {
            method: request.method,
            path: request.path,
            query: request.query,
            body: request.body,
            bearer: request.bearer.map(|t| t.expose_secret().to_string()),
        };

        let (next, hook) = {
            let mut state = self.state.lock();
            state.requests.push(recorded.clone());
            (state.queue.pop_front(), state.hook.clone())
        };

        if let Some(hook) = hook {
            hook(&recorded);
        }

        match next {
            Some(Scripted::Respond(response)) => Ok(response),
            Some(Scripted::TimedOut) => Err(ClientError::Timeout),
            Some(Scripted::NetworkDown) => {
                Err(ClientError::Network("connection refused".to_string()))
            }
            None => Err(ClientError::Network(format!(
                "no scripted response for {} {}",
                recorded.method, recorded.path
            ))),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replays_in_order_and_records() {
        let transport = ScriptedTransport::new();
        transport.respond_ok("first").fail_timeout();

        let first = transport.send(ApiRequest::get("/a")).await.unwrap();
        assert_eq!(first.status, 200);
        assert!(first.body.contains("first"));

        let second = transport.send(ApiRequest::delete("/b")).await;
        assert!(matches!(second, Err(ClientError::Timeout)));

        let third = transport.send(ApiRequest::get("/c")).await;
        assert!(matches!(third, Err(ClientError::Network(_))));

        let paths: Vec<_> = transport.requests().into_iter().map(|r| r.path).collect();
        assert_eq!(paths, vec!["/a", "/b", "/c"]);
        assert_eq!(transport.remaining(), 0);
    }

    #[tokio::test]
    async fn test_hook_runs_before_response() {
        let transport = ScriptedTransport::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        transport.on_send(move |r| sink.lock().push(r.path.clone()));
        transport.respond_ok(Value::Null);

        transport.send(ApiRequest::get("/hooked")).await.unwrap();
        assert_eq!(*seen.lock(), vec!["/hooked".to_string()]);
    }
}
