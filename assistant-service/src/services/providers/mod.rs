//! External AI service clients.
//!
//! Trait-based abstraction over the completion and speech-synthesis APIs,
//! allowing handlers and tests to swap in mock backends.

pub mod elevenlabs;
pub mod mock;
pub mod openai;

use async_trait::async_trait;
use serde::Serialize;
use service_core::error::AppError;
use thiserror::Error;

/// Error type for provider calls.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Non-success upstream status; carries the raw response body.
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(String),
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::ApiError(body) => AppError::Upstream(body),
            ProviderError::NetworkError(msg) => AppError::Upstream(msg),
        }
    }
}

/// Role of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// One role-tagged entry in a completion request.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Sampling parameters for a completion request.
#[derive(Debug, Clone, Copy)]
pub struct CompletionParams {
    pub temperature: f32,
}

/// Trait for chat-completion backends.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Generate a reply for the given messages.
    ///
    /// Returns `None` when the upstream answered successfully but produced
    /// no usable text content.
    async fn complete(
        &self,
        messages: &[ChatMessage],
        params: CompletionParams,
    ) -> Result<Option<String>, ProviderError>;
}

/// Trait for text-to-speech backends.
#[async_trait]
pub trait SpeechProvider: Send + Sync {
    /// Convert `text` to encoded audio bytes.
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, ProviderError>;
}
