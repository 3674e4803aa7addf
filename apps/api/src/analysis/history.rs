use sqlx::PgPool;
use tracing::info;

use crate::analysis::scoring::ReadabilityReport;
use crate::errors::AppError;
use crate::models::analysis::AnalysisRecord;

/// How many history rows a user gets back per request.
const HISTORY_LIMIT: i64 = 20;

/// Persists one analysis for a user. Only the three grade indices are
/// stored; the rest of the report is response-only display data.
pub async fn record_analysis(
    pool: &PgPool,
    user_id: i64,
    file_name: Option<&str>,
    analysis_type: &str,
    report: &ReadabilityReport,
) -> Result<AnalysisRecord, AppError> {
    let record: AnalysisRecord = sqlx::query_as(
        r#"
        INSERT INTO analysis_history
            (user_id, file_name, analysis_type,
             flesch_kincaid_grade_level, gunning_fog_index, smog_index)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(file_name)
    .bind(analysis_type)
    .bind(report.flesch_kincaid_grade)
    .bind(report.gunning_fog_index)
    .bind(report.smog_index)
    .fetch_one(pool)
    .await?;

    info!(
        "Recorded {} analysis {} for user {}",
        analysis_type, record.id, user_id
    );
    Ok(record)
}

/// Returns the user's most recent analyses, newest first.
pub async fn recent_for_user(pool: &PgPool, user_id: i64) -> Result<Vec<AnalysisRecord>, AppError> {
    Ok(sqlx::query_as(
        r#"
        SELECT * FROM analysis_history
        WHERE user_id = $1
        ORDER BY created_at DESC, id DESC
        LIMIT $2
        "#,
    )
    .bind(user_id)
    .bind(HISTORY_LIMIT)
    .fetch_all(pool)
    .await?)
}
