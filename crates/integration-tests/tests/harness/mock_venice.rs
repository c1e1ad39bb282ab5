//! Mock primary provider for integration tests
//!
//! Implements the OpenAI-compatible chat completion endpoint with a fixed
//! behavior per instance

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

/// How the mock answers every completion request
#[derive(Debug, Clone)]
enum Behavior {
    Reply(String),
    Status(StatusCode),
    NoChoices,
    Hang,
}

/// Mock Venice backend
pub struct MockVenice {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockVeniceState>,
}

struct MockVeniceState {
    behavior: Behavior,
    requests: Mutex<Vec<Value>>,
    authorization: Mutex<Vec<String>>,
}

impl MockVenice {
    /// Answer every request with `content` as the first choice
    pub async fn replying(content: &str) -> anyhow::Result<Self> {
        Self::start(Behavior::Reply(content.to_owned())).await
    }

    /// Answer every request with an error status
    pub async fn failing(status: u16) -> anyhow::Result<Self> {
        Self::start(Behavior::Status(StatusCode::from_u16(status)?)).await
    }

    /// Answer every request with an empty `choices` list
    pub async fn without_choices() -> anyhow::Result<Self> {
        Self::start(Behavior::NoChoices).await
    }

    /// Accept every request and never answer it
    pub async fn hanging() -> anyhow::Result<Self> {
        Self::start(Behavior::Hang).await
    }

    async fn start(behavior: Behavior) -> anyhow::Result<Self> {
        let state = Arc::new(MockVeniceState {
            behavior,
            requests: Mutex::new(Vec::new()),
            authorization: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/v1/chat/completions", routing::post(handle_chat_completions))
            .with_state(Arc::clone(&state));

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

    /// Base URL for configuring the mock as the primary provider
    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    /// Number of completion requests received
    pub fn request_count(&self) -> usize {
        self.state.requests.lock().unwrap().len()
    }

    /// Bodies of the completion requests received so far
    pub fn requests(&self) -> Vec<Value> {
        self.state.requests.lock().unwrap().clone()
    }

    /// `Authorization` headers received so far
    pub fn authorization_headers(&self) -> Vec<String> {
        self.state.authorization.lock().unwrap().clone()
    }
}

impl Drop for MockVenice {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle_chat_completions(
    State(state): State<Arc<MockVeniceState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Some(auth) = headers.get("authorization").and_then(|v| v.to_str().ok()) {
        state.authorization.lock().unwrap().push(auth.to_owned());
    }
    let model = body["model"].clone();
    state.requests.lock().unwrap().push(body);

    match &state.behavior {
        Behavior::Reply(content) => Json(json!({
            "id": "chatcmpl-mock",
            "object": "chat.completion",
            "model": model,
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }]
        }))
        .into_response(),
        Behavior::Status(status) => (*status, Json(json!({"error": "mock failure"}))).into_response(),
        Behavior::NoChoices => Json(json!({"id": "chatcmpl-mock", "model": model, "choices": []})).into_response(),
        Behavior::Hang => {
            // Outlives any client timeout used in tests
            tokio::time::sleep(std::time::Duration::from_secs(300)).await;
            StatusCode::GATEWAY_TIMEOUT.into_response()
        }
    }
}
