use anyhow::Result;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::analysis::scorer::RoleScore;
use crate::errors::AppError;
use crate::models::analysis::AnalysisRow;

/// Parameters for recording one submission.
pub struct NewAnalysis<'a> {
    pub user_id: Uuid,
    pub filename: &'a str,
    pub skills: &'a [String],
    pub roles: &'a [RoleScore],
}

/// Stores a submission. Append-only: analyses are never updated, and they
/// disappear only through the cascade on `users`.
pub async fn insert_analysis(
    pool: &PgPool,
    params: NewAnalysis<'_>,
) -> Result<AnalysisRow, AppError> {
    let NewAnalysis {
        user_id,
        filename,
        skills,
        roles,
    } = params;

    let row = sqlx::query_as::<_, AnalysisRow>(
        r#"
        INSERT INTO analyses (id, user_id, filename, skills_found, role_scores)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(filename)
    .bind(Json(skills))
    .bind(Json(roles))
    .fetch_one(pool)
    .await
    .map_err(|e| {
        if is_foreign_key_violation(&e) {
            AppError::NotFound(format!("User {user_id} not found"))
        } else {
            AppError::Database(e)
        }
    })?;

    info!(
        "Stored analysis {} for user {user_id} ({} skills, {} roles)",
        row.id,
        skills.len(),
        roles.len()
    );
    Ok(row)
}

/// Returns every analysis a user owns, oldest first.
pub async fn list_analyses(pool: &PgPool, user_id: Uuid) -> Result<Vec<AnalysisRow>> {
    Ok(sqlx::query_as::<_, AnalysisRow>(
        "SELECT * FROM analyses WHERE user_id = $1 ORDER BY created_at ASC, id ASC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?)
}

/// Returns a user's most recent analysis, if any.
pub async fn latest_analysis(pool: &PgPool, user_id: Uuid) -> Result<Option<AnalysisRow>> {
    Ok(sqlx::query_as::<_, AnalysisRow>(
        "SELECT * FROM analyses WHERE user_id = $1 ORDER BY created_at DESC, id DESC LIMIT 1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?)
}

pub async fn count_analyses(pool: &PgPool, user_id: Uuid) -> Result<i64> {
    Ok(
        sqlx::query_scalar("SELECT COUNT(*) FROM analyses WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await?,
    )
}

fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => db.code().as_deref() == Some("23503"),
        _ => false,
    }
}
