use axum::Json;
use axum::response::IntoResponse;
use http::StatusCode;
use serde_json::json;

/// Health check handler
pub async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}
