use crate::dtos::AnalysisResponse;
use crate::services::schedule::ScheduleAnalyzer;
use crate::startup::AppState;
use axum::{
    Json,
    extract::{Multipart, State},
    response::IntoResponse,
};
use service_core::error::AppError;

/// Multipart form field carrying the schedule file.
const SCHEDULE_FIELD: &str = "schedule";

pub async fn upload_schedule(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut file_bytes: Option<Vec<u8>> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::BadRequest(anyhow::anyhow!("Failed to read multipart field: {}", e))
    })? {
        if field.name() == Some(SCHEDULE_FIELD) {
            let data = field.bytes().await.map_err(|e| {
                AppError::BadRequest(anyhow::anyhow!("Failed to read file bytes: {}", e))
            })?;
            file_bytes = Some(data.to_vec());
            break;
        }
    }

    let file_bytes = file_bytes
        .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("No schedule file uploaded")))?;

    tracing::info!(size = file_bytes.len(), "Schedule upload received");

    let analyzer = ScheduleAnalyzer::new(state.completion.clone());
    let analysis = analyzer.analyze(&file_bytes).await?;

    Ok(Json(AnalysisResponse { analysis }))
}
