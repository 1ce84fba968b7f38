use serde::{Deserialize, Serialize};

/// Body of `POST /api/chat`.
///
/// `text` is accepted as an alias for `message`; older front-end builds
/// still send it.
#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(alias = "text")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
    /// Base64-encoded audio of the reply, or `null` when synthesis is not
    /// configured or did not succeed.
    #[serde(rename = "audioBase64")]
    pub audio_base64: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub analysis: String,
}
