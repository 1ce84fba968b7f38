use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// Upper bound on uploaded schedule files (5 MB), buffered fully in memory.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Front-end origins allowed by default when `ALLOWED_ORIGINS` is unset.
const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:5173,http://localhost:3000";

const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";

#[derive(Debug, Clone)]
pub struct AssistantConfig {
    pub common: core_config::Config,
    pub completion: CompletionConfig,
    pub speech: SpeechConfig,
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct CompletionConfig {
    /// Absence is tolerated at startup; chat and analysis requests then fail
    /// with a configuration error instead of the process refusing to boot.
    pub api_key: Option<String>,
    pub model: String,
}

#[derive(Debug, Clone)]
pub struct SpeechConfig {
    pub api_key: Option<String>,
    pub voice_id: Option<String>,
}

impl SpeechConfig {
    /// Synthesis runs only when both the credential and the voice are set.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.api_key.as_deref(), self.voice_id.as_deref()) {
            (Some(key), Some(voice)) => Some((key, voice)),
            _ => None,
        }
    }
}

impl AssistantConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGINS.to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Ok(AssistantConfig {
            common,
            completion: CompletionConfig {
                api_key: optional_env("OPENAI_API_KEY"),
                model: env::var("OPENAI_CHAT_MODEL")
                    .unwrap_or_else(|_| DEFAULT_CHAT_MODEL.to_string()),
            },
            speech: SpeechConfig {
                api_key: optional_env("ELEVENLABS_API_KEY"),
                voice_id: optional_env("ELEVENLABS_VOICE_ID"),
            },
            allowed_origins,
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}
