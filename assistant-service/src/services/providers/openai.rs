//! OpenAI chat-completion client.

use super::{ChatMessage, CompletionParams, CompletionProvider, ProviderError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// OpenAI API base URL.
const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

/// OpenAI provider configuration.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub model: String,
}

/// OpenAI completion provider.
pub struct OpenAiCompletionProvider {
    config: OpenAiConfig,
    client: Client,
}

impl OpenAiCompletionProvider {
    pub fn new(config: OpenAiConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }
}

#[async_trait]
impl CompletionProvider for OpenAiCompletionProvider {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        params: CompletionParams,
    ) -> Result<Option<String>, ProviderError> {
        let request = ChatCompletionRequest {
            model: &self.config.model,
            messages,
            temperature: params.temperature,
        };

        let url = format!("{}/chat/completions", OPENAI_API_BASE);

        tracing::debug!(
            model = %self.config.model,
            message_count = messages.len(),
            "Sending request to completion API"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();

            return Err(ProviderError::ApiError(format!(
                "OpenAI API error {}: {}",
                status, error_text
            )));
        }

        let api_response: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ApiError(format!("Failed to parse response: {}", e)))?;

        let text = api_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty());

        Ok(text)
    }
}

// ============================================================================
// OpenAI API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}
