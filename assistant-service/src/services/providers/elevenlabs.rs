//! ElevenLabs text-to-speech client.

use super::{ProviderError, SpeechProvider};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

/// ElevenLabs API base URL.
const ELEVENLABS_API_BASE: &str = "https://api.elevenlabs.io/v1";

/// Fixed synthesis model and voice tuning.
const SPEECH_MODEL: &str = "eleven_multilingual_v2";
const VOICE_STABILITY: f32 = 0.5;
const VOICE_SIMILARITY_BOOST: f32 = 0.75;

/// ElevenLabs provider configuration.
#[derive(Debug, Clone)]
pub struct ElevenLabsConfig {
    pub api_key: String,
    pub voice_id: String,
}

/// ElevenLabs speech provider.
pub struct ElevenLabsSpeechProvider {
    config: ElevenLabsConfig,
    client: Client,
}

impl ElevenLabsSpeechProvider {
    pub fn new(config: ElevenLabsConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }
}

#[async_trait]
impl SpeechProvider for ElevenLabsSpeechProvider {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, ProviderError> {
        let request = SynthesisRequest {
            text,
            model_id: SPEECH_MODEL,
            voice_settings: VoiceSettings {
                stability: VOICE_STABILITY,
                similarity_boost: VOICE_SIMILARITY_BOOST,
            },
        };

        let url = format!(
            "{}/text-to-speech/{}",
            ELEVENLABS_API_BASE, self.config.voice_id
        );

        tracing::debug!(
            voice = %self.config.voice_id,
            text_len = text.len(),
            "Sending request to synthesis API"
        );

        let response = self
            .client
            .post(&url)
            .header("xi-api-key", &self.config.api_key)
            .header(reqwest::header::ACCEPT, "audio/mpeg")
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();

            return Err(ProviderError::ApiError(format!(
                "ElevenLabs API error {}: {}",
                status, error_text
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        Ok(bytes.to_vec())
    }
}

// ============================================================================
// ElevenLabs API Request Types
// ============================================================================

#[derive(Debug, Serialize)]
struct SynthesisRequest<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: VoiceSettings,
}

#[derive(Debug, Serialize)]
struct VoiceSettings {
    stability: f32,
    similarity_boost: f32,
}
