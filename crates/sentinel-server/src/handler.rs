//! Routes for the analysis API

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::routing::{get, post};
use axum::{Json, Router};
use sentinel_core::ResponseEnvelope;
use serde_json::{Value, json};

use crate::invoker::Invoker;
use crate::task::Task;
use crate::tasks::{AnalysisRequest, InsuranceRequest, RecommendationRequest, TranslationRequest};

/// Characters of submitted source included in the request log line
const PREVIEW_CHARS: usize = 100;

/// Build the router serving the banner and the four analysis endpoints
pub fn analysis_router(invoker: Invoker) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route(&path::<AnalysisRequest>(), post(task_handler::<AnalysisRequest>))
        .route(&path::<TranslationRequest>(), post(task_handler::<TranslationRequest>))
        .route(&path::<InsuranceRequest>(), post(task_handler::<InsuranceRequest>))
        .route(&path::<RecommendationRequest>(), post(task_handler::<RecommendationRequest>))
        .with_state(invoker)
}

fn path<T: Task>() -> String {
    format!("/{}", T::NAME)
}

async fn root_handler() -> Json<Value> {
    Json(json!({"message": "Sentinel contract analysis API is running"}))
}

/// Run one task through the invoker
///
/// Every outcome, including an unreadable body, is answered with 200 and an
/// envelope.
async fn task_handler<T: Task>(
    State(invoker): State<Invoker>,
    body: Result<Json<T>, JsonRejection>,
) -> Json<ResponseEnvelope> {
    let task = match body {
        Ok(Json(task)) => task,
        Err(rejection) => {
            let message = rejection.body_text();
            tracing::warn!(task = T::NAME, error = %message, "rejected request body");
            return Json(ResponseEnvelope::error(message));
        }
    };

    tracing::debug!(task = T::NAME, source = %preview(task.source()), "received request");

    Json(invoker.invoke(&task.prompt()).await)
}

fn preview(source: &str) -> String {
    let mut preview: String = source.chars().take(PREVIEW_CHARS).collect();
    if source.chars().nth(PREVIEW_CHARS).is_some() {
        preview.push_str("...");
    }
    preview
}
