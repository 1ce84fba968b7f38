//! Mock provider implementations for testing.

use super::{ChatMessage, CompletionParams, CompletionProvider, ProviderError, SpeechProvider};
use async_trait::async_trait;
use std::sync::Mutex;

/// One completion request as seen by the mock.
#[derive(Debug, Clone)]
pub struct CapturedCompletion {
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
}

/// Mock completion provider that records every request it receives.
pub struct MockCompletionProvider {
    reply: Option<String>,
    fail_with: Option<String>,
    pub captured: Mutex<Vec<CapturedCompletion>>,
}

impl MockCompletionProvider {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            fail_with: None,
            captured: Mutex::new(Vec::new()),
        }
    }

    /// Successful upstream response with no usable text content.
    pub fn empty() -> Self {
        Self {
            reply: None,
            fail_with: None,
            captured: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error_body: &str) -> Self {
        Self {
            reply: None,
            fail_with: Some(error_body.to_string()),
            captured: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<CapturedCompletion> {
        self.captured.lock().expect("captured lock poisoned").clone()
    }
}

#[async_trait]
impl CompletionProvider for MockCompletionProvider {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        params: CompletionParams,
    ) -> Result<Option<String>, ProviderError> {
        self.captured
            .lock()
            .expect("captured lock poisoned")
            .push(CapturedCompletion {
                messages: messages.to_vec(),
                temperature: params.temperature,
            });

        if let Some(body) = &self.fail_with {
            return Err(ProviderError::ApiError(body.clone()));
        }

        Ok(self.reply.clone())
    }
}

/// Mock speech provider.
pub struct MockSpeechProvider {
    audio: Option<Vec<u8>>,
}

impl MockSpeechProvider {
    pub fn returning(audio: Vec<u8>) -> Self {
        Self { audio: Some(audio) }
    }

    pub fn failing() -> Self {
        Self { audio: None }
    }
}

#[async_trait]
impl SpeechProvider for MockSpeechProvider {
    async fn synthesize(&self, _text: &str) -> Result<Vec<u8>, ProviderError> {
        match &self.audio {
            Some(bytes) => Ok(bytes.clone()),
            None => Err(ProviderError::ApiError(
                "synthesis unavailable".to_string(),
            )),
        }
    }
}
