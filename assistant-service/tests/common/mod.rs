//! Shared helpers for integration tests.
#![allow(dead_code)]

use assistant_service::config::{AssistantConfig, CompletionConfig, SpeechConfig};
use assistant_service::services::providers::{CompletionProvider, SpeechProvider};
use assistant_service::startup::{AppState, build_router};
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

pub fn test_config() -> AssistantConfig {
    AssistantConfig {
        common: service_core::config::Config {
            port: 0,
            log_level: "info".to_string(),
        },
        completion: CompletionConfig {
            api_key: None,
            model: "gpt-4o-mini".to_string(),
        },
        speech: SpeechConfig {
            api_key: None,
            voice_id: None,
        },
        allowed_origins: vec![
            "http://localhost:5173".to_string(),
            "https://scheduler-app".to_string(),
        ],
    }
}

/// Build the real router with the given providers injected.
pub fn app(
    completion: Option<Arc<dyn CompletionProvider>>,
    speech: Option<Arc<dyn SpeechProvider>>,
) -> Router {
    build_router(AppState {
        config: test_config(),
        completion,
        speech,
    })
}

pub fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("failed to build request")
}

/// Send a request and return the status plus the JSON body (null when the
/// body is empty or not JSON).
pub async fn send(router: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = router.oneshot(request).await.expect("request failed");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("failed to read body")
        .to_bytes();

    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}
