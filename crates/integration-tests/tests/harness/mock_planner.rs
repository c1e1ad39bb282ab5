//! Mock planning service for integration tests
//!
//! Builds one-step plans that echo the query and completes every run

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

/// Final output reported by every successful run
pub const RUN_OUTPUT: &str = "planner analysis of the contract";

/// Mock planner backend
pub struct MockPlanner {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockPlannerState>,
}

struct MockPlannerState {
    fail_plans: AtomicBool,
    fail_runs: AtomicBool,
    plan_count: AtomicU32,
    run_count: AtomicU32,
    queries: Mutex<Vec<String>>,
    authorization: Mutex<Vec<String>>,
}

impl MockPlanner {
    /// Start a planner that succeeds
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_inner(false, false).await
    }

    /// Start a planner whose plan endpoint answers 500
    pub async fn failing_plans() -> anyhow::Result<Self> {
        Self::start_inner(true, false).await
    }

    /// Start a planner whose run endpoint answers 500
    pub async fn failing_runs() -> anyhow::Result<Self> {
        Self::start_inner(false, true).await
    }

    async fn start_inner(fail_plans: bool, fail_runs: bool) -> anyhow::Result<Self> {
        let state = Arc::new(MockPlannerState {
            fail_plans: AtomicBool::new(fail_plans),
            fail_runs: AtomicBool::new(fail_runs),
            plan_count: AtomicU32::new(0),
            run_count: AtomicU32::new(0),
            queries: Mutex::new(Vec::new()),
            authorization: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/api/v0/plans", routing::post(handle_plan))
            .route("/api/v0/plan-runs", routing::post(handle_run))
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

    /// Base URL for configuring the mock as the planner
    pub fn base_url(&self) -> String {
        format!("http://{}/api/v0", self.addr)
    }

    /// Number of plan requests received
    pub fn plan_count(&self) -> u32 {
        self.state.plan_count.load(Ordering::Relaxed)
    }

    /// Number of plan-run requests received
    pub fn run_count(&self) -> u32 {
        self.state.run_count.load(Ordering::Relaxed)
    }

    /// Queries received by the plan endpoint
    pub fn queries(&self) -> Vec<String> {
        self.state.queries.lock().unwrap().clone()
    }

    /// `Authorization` headers received so far
    pub fn authorization_headers(&self) -> Vec<String> {
        self.state.authorization.lock().unwrap().clone()
    }
}

impl Drop for MockPlanner {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

fn record_auth(state: &MockPlannerState, headers: &HeaderMap) {
    if let Some(auth) = headers.get("authorization").and_then(|v| v.to_str().ok()) {
        state.authorization.lock().unwrap().push(auth.to_owned());
    }
}

async fn handle_plan(
    State(state): State<Arc<MockPlannerState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    record_auth(&state, &headers);
    let n = state.plan_count.fetch_add(1, Ordering::Relaxed) + 1;

    if state.fail_plans.load(Ordering::Relaxed) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "planning backend unavailable").into_response();
    }

    let query = body["query"].as_str().unwrap_or_default().to_owned();
    state.queries.lock().unwrap().push(query.clone());

    Json(json!({
        "id": format!("plan-{n}"),
        "plan_context": {"query": query, "tool_ids": []},
        "steps": [{"task": "Review the contract", "output": "$analysis"}]
    }))
    .into_response()
}

async fn handle_run(
    State(state): State<Arc<MockPlannerState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    record_auth(&state, &headers);
    let n = state.run_count.fetch_add(1, Ordering::Relaxed) + 1;

    if state.fail_runs.load(Ordering::Relaxed) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "plan execution crashed").into_response();
    }

    Json(json!({
        "id": format!("prun-{n}"),
        "plan_id": body["plan"]["id"],
        "state": "COMPLETE",
        "outputs": {
            "final_output": {"value": RUN_OUTPUT, "summary": RUN_OUTPUT}
        }
    }))
    .into_response()
}
