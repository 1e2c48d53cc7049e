//! Mock todo API backend for gateway tests
//!
//! Answers every request with one canned response and records what it
//! received, so tests can assert on the exact wire traffic

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use http::{HeaderMap, Method, StatusCode, Uri};
use tokio_util::sync::CancellationToken;

/// A request as seen by the mock backend
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
    pub body: Bytes,
}

#[derive(Clone)]
struct Canned {
    status: StatusCode,
    content_type: Option<&'static str>,
    body: Option<String>,
}

struct MockApiState {
    canned: Canned,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// Mock backend returning a fixed response
pub struct MockApi {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockApiState>,
}

impl MockApi {
    /// Respond with `status` and a JSON body
    pub async fn json(status: u16, body: serde_json::Value) -> anyhow::Result<Self> {
        Self::start(status, Some("application/json"), Some(body.to_string())).await
    }

    /// Respond with `status` and a raw body of the given content type
    pub async fn raw(status: u16, content_type: &'static str, body: &str) -> anyhow::Result<Self> {
        Self::start(status, Some(content_type), Some(body.to_owned())).await
    }

    /// Respond with `status` and no body
    pub async fn empty(status: u16) -> anyhow::Result<Self> {
        Self::start(status, None, None).await
    }

    async fn start(status: u16, content_type: Option<&'static str>, body: Option<String>) -> anyhow::Result<Self> {
        let state = Arc::new(MockApiState {
            canned: Canned {
                status: StatusCode::from_u16(status)?,
                content_type,
                body,
            },
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new().fallback(handle_any).with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL of the mock backend
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// All requests received so far
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    /// The single request received; panics if there were none or several
    pub fn only_request(&self) -> RecordedRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request, got {}", requests.len());
        requests.into_iter().next().unwrap()
    }
}

impl Drop for MockApi {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle_any(
    State(state): State<Arc<MockApiState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    state.requests.lock().unwrap().push(RecordedRequest {
        method,
        uri,
        headers,
        body,
    });

    let canned = state.canned.clone();
    let mut response = canned.body.unwrap_or_default().into_response();
    *response.status_mut() = canned.status;

    match canned.content_type {
        Some(content_type) => {
            response
                .headers_mut()
                .insert(http::header::CONTENT_TYPE, http::HeaderValue::from_static(content_type));
        }
        None => {
            response.headers_mut().remove(http::header::CONTENT_TYPE);
        }
    }

    response
}
