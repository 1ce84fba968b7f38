//! Schedule normalization: turn an uploaded CSV into a bounded textual
//! prompt and relay it to the completion service for risk analysis.

use crate::services::providers::{ChatMessage, CompletionParams, CompletionProvider};
use service_core::error::AppError;
use std::sync::Arc;
use thiserror::Error;

/// Data rows retained from an upload; caps upstream token usage.
pub const MAX_DATA_ROWS: usize = 120;

/// Analysis runs cooler than chat for more deterministic output.
const ANALYSIS_TEMPERATURE: f32 = 0.2;

pub const ANALYSIS_FALLBACK: &str = "No analysis could be produced for this schedule.";

const ANALYSIS_SYSTEM_PROMPT: &str = "You are an operations analyst reviewing a work schedule. \
First give a short overall assessment of the schedule. Then list 8-12 risks as a markdown \
table with columns: ID, Risk, Why it matters, Suggested mitigation, Likelihood, Impact.";

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("Could not parse the uploaded file as CSV: {0}")]
    Parse(#[from] csv::Error),

    #[error("The schedule contains no data rows")]
    Empty,
}

impl From<ScheduleError> for AppError {
    fn from(err: ScheduleError) -> Self {
        AppError::BadRequest(anyhow::Error::new(err))
    }
}

/// Re-encode an uploaded CSV as a compact comma-delimited block.
///
/// The first CSV record supplies the column order. Cell values have newline
/// runs collapsed to single spaces and commas replaced by semicolons, so
/// each rendered row stays a single unquoted comma-joined line. This
/// re-serialization is lossy on purpose; downstream consumers only need a
/// readable table, not a round-trippable one.
pub fn render_schedule(file_bytes: &[u8]) -> Result<String, ScheduleError> {
    let text = String::from_utf8_lossy(file_bytes);
    let mut reader = csv::ReaderBuilder::new().from_reader(text.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_owned).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        rows.push(record?);
    }

    if rows.is_empty() {
        return Err(ScheduleError::Empty);
    }
    rows.truncate(MAX_DATA_ROWS);

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(headers.join(","));
    for row in &rows {
        let cells: Vec<String> = row.iter().map(sanitize_cell).collect();
        lines.push(cells.join(","));
    }

    Ok(lines.join("\n"))
}

/// Collapse newline runs to single spaces and turn commas into semicolons.
fn sanitize_cell(value: &str) -> String {
    let segments: Vec<&str> = value
        .split(['\r', '\n'])
        .filter(|segment| !segment.is_empty())
        .collect();
    segments.join(" ").replace(',', ";")
}

pub struct ScheduleAnalyzer {
    completion: Option<Arc<dyn CompletionProvider>>,
}

impl ScheduleAnalyzer {
    pub fn new(completion: Option<Arc<dyn CompletionProvider>>) -> Self {
        Self { completion }
    }

    /// Render the uploaded bytes and relay them for analysis.
    pub async fn analyze(&self, file_bytes: &[u8]) -> Result<String, AppError> {
        let completion = self.completion.as_ref().ok_or_else(|| {
            AppError::ConfigError(anyhow::anyhow!("Completion service credential is not set"))
        })?;

        let rendered = render_schedule(file_bytes)?;

        tracing::debug!(rendered_len = rendered.len(), "Schedule rendered for analysis");

        let messages = [
            ChatMessage::system(ANALYSIS_SYSTEM_PROMPT),
            ChatMessage::user(format!(
                "Here is the schedule data in CSV form:\n\n{}",
                rendered
            )),
        ];

        let analysis = completion
            .complete(
                &messages,
                CompletionParams {
                    temperature: ANALYSIS_TEMPERATURE,
                },
            )
            .await
            .map_err(AppError::from)?
            .unwrap_or_else(|| ANALYSIS_FALLBACK.to_string());

        Ok(analysis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_header_line_plus_data_lines() {
        let rendered = render_schedule(b"name,shift\nana,night\nbo,day\n").unwrap();
        assert_eq!(rendered, "name,shift\nana,night\nbo,day");
    }

    #[test]
    fn truncates_to_max_data_rows() {
        let mut csv = String::from("id,task\n");
        for i in 0..200 {
            csv.push_str(&format!("{},work\n", i));
        }

        let rendered = render_schedule(csv.as_bytes()).unwrap();

        assert_eq!(rendered.lines().count(), MAX_DATA_ROWS + 1);
        assert!(rendered.ends_with("119,work"));
    }

    #[test]
    fn sanitizes_commas_and_newlines_in_cells() {
        let rendered =
            render_schedule(b"name,notes\nana,\"on call, may rotate\nsecond line\"\n").unwrap();

        let data_line = rendered.lines().nth(1).unwrap();
        assert_eq!(data_line, "ana,on call; may rotate second line");
    }

    #[test]
    fn crlf_breaks_collapse_to_one_space() {
        assert_eq!(sanitize_cell("a\r\nb"), "a b");
        assert_eq!(sanitize_cell("a\n\nb"), "a b");
    }

    #[test]
    fn header_only_input_is_empty() {
        let err = render_schedule(b"name,shift\n").unwrap_err();
        assert!(matches!(err, ScheduleError::Empty));
    }

    #[test]
    fn ragged_rows_are_a_parse_error() {
        let err = render_schedule(b"a,b\n1,2,3\n").unwrap_err();
        assert!(matches!(err, ScheduleError::Parse(_)));
    }
}
