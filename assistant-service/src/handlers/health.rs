use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

/// Plaintext liveness string at the root path.
pub async fn index() -> impl IntoResponse {
    "Assistant relay is running"
}

pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "service": "assistant-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}
