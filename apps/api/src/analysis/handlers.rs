use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::analysis::extract::extract_text;
use crate::analysis::history;
use crate::analysis::scoring::{analyze, ReadabilityReport};
use crate::auth::extract::CurrentUser;
use crate::errors::AppError;
use crate::models::analysis::AnalysisRecord;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TextAnalysisRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct TextAnalysisResponse {
    pub record_id: i64,
    pub analysis: ReadabilityReport,
}

#[derive(Debug, Serialize)]
pub struct FileAnalysisResponse {
    pub record_id: i64,
    pub file_name: String,
    pub file_size: usize,
    pub analysis: ReadabilityReport,
}

/// POST /api/v1/analysis/text
pub async fn handle_analyze_text(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<TextAnalysisRequest>,
) -> Result<Json<TextAnalysisResponse>, AppError> {
    let report = analyze(&req.text)?;
    let record = history::record_analysis(&state.db, user.id, None, "text", &report).await?;

    Ok(Json(TextAnalysisResponse {
        record_id: record.id,
        analysis: report,
    }))
}

/// POST /api/v1/analysis/file
/// Multipart upload with a single `file` field. The size limit is checked
/// on the raw bytes before any extraction work happens.
pub async fn handle_analyze_file(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    mut multipart: Multipart,
) -> Result<Json<FileAnalysisResponse>, AppError> {
    let mut file_name: Option<String> = None;
    let mut content_type: Option<String> = None;
    let mut data: Option<bytes::Bytes> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            file_name = field.file_name().map(str::to_string);
            content_type = field.content_type().map(str::to_string);
            data = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?,
            );
        }
    }

    let file_name = file_name
        .ok_or_else(|| AppError::Validation("Missing 'file' field in upload".to_string()))?;
    let data =
        data.ok_or_else(|| AppError::Validation("Missing 'file' field in upload".to_string()))?;

    if data.len() > state.config.max_file_size {
        return Err(AppError::PayloadTooLarge(format!(
            "File too large. Maximum size is {:.1}MB",
            state.config.max_file_size as f64 / (1024.0 * 1024.0)
        )));
    }

    let text = extract_text(&data, &file_name, content_type.as_deref())?;
    let report = analyze(&text)?;
    let record =
        history::record_analysis(&state.db, user.id, Some(&file_name), "file", &report).await?;

    Ok(Json(FileAnalysisResponse {
        record_id: record.id,
        file_name,
        file_size: data.len(),
        analysis: report,
    }))
}

/// GET /api/v1/analysis/history
pub async fn handle_history(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<AnalysisRecord>>, AppError> {
    let records = history::recent_for_user(&state.db, user.id).await?;
    Ok(Json(records))
}
