use crate::dtos::{ChatRequest, ChatResponse};
use crate::services::chat::{ChatOrchestrator, SynthesisOutcome};
use crate::startup::AppState;
use axum::{Json, body::Bytes, extract::State, response::IntoResponse};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use service_core::error::AppError;

pub async fn chat(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    // A missing or malformed body counts as an empty request, not an error;
    // the orchestrator answers those with the canned greeting.
    let request: ChatRequest = serde_json::from_slice(&body).unwrap_or_default();
    let message = request.message.unwrap_or_default();

    let orchestrator = ChatOrchestrator::new(state.completion.clone(), state.speech.clone());
    let outcome = orchestrator.respond(&message).await?;

    let audio_base64 = match outcome.synthesis {
        SynthesisOutcome::Audio(bytes) => Some(BASE64.encode(bytes)),
        SynthesisOutcome::Skipped | SynthesisOutcome::Failed => None,
    };

    Ok(Json(ChatResponse {
        reply: outcome.reply,
        audio_base64,
    }))
}
