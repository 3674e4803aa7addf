use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// One persisted readability analysis. Rows are immutable after insert and
/// owned by exactly one user (FK cascade on user delete).
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AnalysisRecord {
    pub id: i64,
    pub user_id: i64,
    pub file_name: Option<String>,
    pub analysis_type: String,
    pub flesch_kincaid_grade_level: Option<f64>,
    pub gunning_fog_index: Option<f64>,
    pub smog_index: Option<f64>,
    pub created_at: DateTime<Utc>,
}
