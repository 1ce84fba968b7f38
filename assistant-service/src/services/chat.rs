//! Chat orchestration: one completion call, then optional speech synthesis.

use crate::services::providers::{
    ChatMessage, CompletionParams, CompletionProvider, SpeechProvider,
};
use service_core::error::AppError;
use std::sync::Arc;

/// Reply for an empty message; a UX default, not an error path.
pub const GREETING_REPLY: &str =
    "Hi! I'm your scheduling assistant. Ask me anything, or upload a schedule to analyze.";

/// Reply when the completion succeeds without usable text.
pub const FALLBACK_REPLY: &str = "I'm not sure how to respond to that.";

const CHAT_TEMPERATURE: f32 = 0.7;

const CHAT_SYSTEM_PROMPT: &str = "You are a friendly workforce-scheduling assistant. \
Answer briefly and concretely, in plain language. Keep paragraphs short, avoid jargon, \
and use markdown bullets when a list reads better.";

/// Result of one synthesis attempt.
///
/// Collapsed to a nullable base64 string at the wire boundary; kept distinct
/// internally so logs can tell a skipped synthesis from a failed one.
#[derive(Debug)]
pub enum SynthesisOutcome {
    /// No speech provider configured.
    Skipped,
    /// Provider configured but the call failed; already logged.
    Failed,
    /// Encoded audio bytes.
    Audio(Vec<u8>),
}

#[derive(Debug)]
pub struct ChatOutcome {
    pub reply: String,
    pub synthesis: SynthesisOutcome,
}

pub struct ChatOrchestrator {
    completion: Option<Arc<dyn CompletionProvider>>,
    speech: Option<Arc<dyn SpeechProvider>>,
}

impl ChatOrchestrator {
    pub fn new(
        completion: Option<Arc<dyn CompletionProvider>>,
        speech: Option<Arc<dyn SpeechProvider>>,
    ) -> Self {
        Self { completion, speech }
    }

    /// Produce a reply for `message`, with audio when synthesis is available.
    ///
    /// Synthesis is purely additive: its failure never fails the response.
    pub async fn respond(&self, message: &str) -> Result<ChatOutcome, AppError> {
        let message = message.trim();
        if message.is_empty() {
            return Ok(ChatOutcome {
                reply: GREETING_REPLY.to_string(),
                synthesis: SynthesisOutcome::Skipped,
            });
        }

        let completion = self.completion.as_ref().ok_or_else(|| {
            AppError::ConfigError(anyhow::anyhow!("Completion service credential is not set"))
        })?;

        let messages = [
            ChatMessage::system(CHAT_SYSTEM_PROMPT),
            ChatMessage::user(message),
        ];

        let reply = completion
            .complete(
                &messages,
                CompletionParams {
                    temperature: CHAT_TEMPERATURE,
                },
            )
            .await
            .map_err(AppError::from)?
            .unwrap_or_else(|| FALLBACK_REPLY.to_string());

        let synthesis = match &self.speech {
            None => SynthesisOutcome::Skipped,
            Some(speech) => match speech.synthesize(&reply).await {
                Ok(audio) => SynthesisOutcome::Audio(audio),
                Err(e) => {
                    tracing::warn!(error = %e, "Speech synthesis failed; continuing without audio");
                    SynthesisOutcome::Failed
                }
            },
        };

        Ok(ChatOutcome { reply, synthesis })
    }
}
