//! Application assembly and lifecycle.

use crate::config::{AssistantConfig, MAX_UPLOAD_BYTES};
use crate::handlers::{chat, health, schedule};
use crate::services::providers::elevenlabs::{ElevenLabsConfig, ElevenLabsSpeechProvider};
use crate::services::providers::openai::{OpenAiCompletionProvider, OpenAiConfig};
use crate::services::providers::{CompletionProvider, SpeechProvider};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
};
use service_core::error::AppError;
use service_core::middleware::origin::{OriginPolicy, origin_guard};
use service_core::middleware::tracing::request_id_middleware;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Shared application state.
///
/// Providers are `None` when their credentials are missing; chat and
/// analysis then surface a configuration error per request.
#[derive(Clone)]
pub struct AppState {
    pub config: AssistantConfig,
    pub completion: Option<Arc<dyn CompletionProvider>>,
    pub speech: Option<Arc<dyn SpeechProvider>>,
}

impl AppState {
    /// Wire up the real providers from configuration.
    pub fn from_config(config: AssistantConfig) -> Self {
        let completion = config.completion.api_key.clone().map(|api_key| {
            Arc::new(OpenAiCompletionProvider::new(OpenAiConfig {
                api_key,
                model: config.completion.model.clone(),
            })) as Arc<dyn CompletionProvider>
        });
        if completion.is_none() {
            tracing::warn!("Completion credential not set; chat and analysis will fail");
        }

        let speech = config.speech.credentials().map(|(api_key, voice_id)| {
            Arc::new(ElevenLabsSpeechProvider::new(ElevenLabsConfig {
                api_key: api_key.to_string(),
                voice_id: voice_id.to_string(),
            })) as Arc<dyn SpeechProvider>
        });
        match &speech {
            Some(_) => tracing::info!("Speech synthesis enabled"),
            None => tracing::info!("Speech synthesis disabled; replies will be text only"),
        }

        Self {
            config,
            completion,
            speech,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let origin_policy = OriginPolicy::new(state.config.allowed_origins.clone());

    Router::new()
        .route("/", get(health::index))
        .route("/health", get(health::health_check))
        .route("/api/chat", post(chat::chat))
        .route(
            "/api/upload-schedule",
            post(schedule::upload_schedule).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .layer(from_fn_with_state(origin_policy, origin_guard))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration.
    ///
    /// Binding port 0 picks a random free port, which tests rely on.
    pub async fn build(config: AssistantConfig) -> Result<Self, AppError> {
        let state = AppState::from_config(config);

        let addr = SocketAddr::from(([0, 0, 0, 0], state.config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        tracing::info!("Assistant relay listening on port {}", self.port);
        axum::serve(self.listener, build_router(self.state)).await
    }
}
