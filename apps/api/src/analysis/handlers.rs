use axum::{
    extract::{Multipart, Query, State},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::extractor::extract_document_text;
use crate::analysis::insights::InsightBundle;
use crate::analysis::pipeline::{RolesChart, SkillsChart};
use crate::analysis::records::{count_analyses, insert_analysis, latest_analysis, list_analyses, NewAnalysis};
use crate::analysis::scorer::{RoleFilter, RoleScore};
use crate::analysis::{analyze_text, AnalysisOutcome, ChartData};
use crate::errors::AppError;
use crate::models::analysis::AnalysisRow;
use crate::session::{resolve_snapshot, SessionSnapshot};
use crate::state::AppState;

const DEFAULT_FILENAME: &str = "resume.pdf";

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

/// Uploads may be anonymous: nothing is stored or cached without a user.
#[derive(Deserialize)]
pub struct OptionalUserQuery {
    #[serde(default)]
    pub user_id: Option<Uuid>,
}

#[derive(Serialize)]
pub struct AnalysisResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis_id: Option<Uuid>,
    pub filename: String,
    pub skills: Vec<String>,
    pub roles: Vec<RoleScore>,
    pub insights: InsightBundle,
    pub charts: ChartData,
    pub show_bars: bool,
}

#[derive(Serialize)]
pub struct DashboardResponse {
    pub total_analyses: i64,
    pub latest_roles: Vec<RoleScore>,
    pub latest_skills: Vec<String>,
}

#[derive(Serialize)]
pub struct ChartsResponse {
    pub roles_chart: Option<RolesChart>,
    pub skills_chart: Option<SkillsChart>,
}

/// Raw multipart fields of one submission.
struct Submission {
    filename: String,
    document: Bytes,
    max_roles: Option<String>,
    min_score: Option<String>,
    show_bars: bool,
}

async fn read_submission(mut multipart: Multipart) -> Result<Submission, AppError> {
    let mut document: Option<(String, Bytes)> = None;
    let mut max_roles = None;
    let mut min_score = None;
    let mut show_bars = false;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => {
                let filename = field
                    .file_name()
                    .map(str::to_string)
                    .unwrap_or_else(|| DEFAULT_FILENAME.to_string());
                if filename.trim().is_empty() {
                    return Err(AppError::Validation("No file selected".to_string()));
                }
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid file: {e}")))?;
                document = Some((filename, data));
            }
            "max_roles" | "min_score" | "show_bars" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid field '{name}': {e}")))?;
                match name.as_str() {
                    "max_roles" => max_roles = Some(value),
                    "min_score" => min_score = Some(value),
                    _ => show_bars = is_checked(&value),
                }
            }
            _ => {}
        }
    }

    let (filename, document) =
        document.ok_or_else(|| AppError::Validation("No resume file provided".to_string()))?;

    Ok(Submission {
        filename,
        document,
        max_roles,
        min_score,
        show_bars,
    })
}

/// Checkbox semantics: present means on, unless explicitly switched off.
fn is_checked(value: &str) -> bool {
    !matches!(
        value.trim().to_lowercase().as_str(),
        "false" | "0" | "off" | "no"
    )
}

/// POST /api/v1/analyses
pub async fn handle_create_analysis(
    State(state): State<AppState>,
    Query(params): Query<OptionalUserQuery>,
    multipart: Multipart,
) -> Result<Json<AnalysisResponse>, AppError> {
    let submission = read_submission(multipart).await?;
    let filter = RoleFilter::from_form(
        submission.min_score.as_deref(),
        submission.max_roles.as_deref(),
    );

    // pdf-extract may panic on malformed input; a panicked task is an unreadable document.
    let document = submission.document;
    let text = tokio::task::spawn_blocking(move || extract_document_text(&document))
        .await
        .map_err(|e| AppError::UnreadableDocument(format!("Text extraction aborted: {e}")))??;

    let outcome = analyze_text(&text, &state.taxonomy, &filter);
    info!(
        "Analyzed '{}': {} skills, {} roles, resume score {}",
        submission.filename,
        outcome.skills.len(),
        outcome.roles.len(),
        outcome.insights.resume_score
    );

    let analysis_id = match params.user_id {
        Some(user_id) => Some(persist_outcome(&state, user_id, &submission.filename, &outcome).await?),
        None => None,
    };

    let AnalysisOutcome {
        skills,
        roles,
        insights,
        charts,
    } = outcome;

    Ok(Json(AnalysisResponse {
        analysis_id,
        filename: submission.filename,
        skills,
        roles,
        insights,
        charts,
        show_bars: submission.show_bars,
    }))
}

/// Stores the record, then refreshes the session cache. A cache failure is
/// logged only: the stored record is enough to rebuild the snapshot later.
async fn persist_outcome(
    state: &AppState,
    user_id: Uuid,
    filename: &str,
    outcome: &AnalysisOutcome,
) -> Result<Uuid, AppError> {
    let row = insert_analysis(
        &state.db,
        NewAnalysis {
            user_id,
            filename,
            skills: &outcome.skills,
            roles: &outcome.roles,
        },
    )
    .await?;

    let snapshot = SessionSnapshot::from(outcome.clone());
    if let Err(e) = state.sessions.save(user_id, &snapshot).await {
        warn!("Failed to cache session snapshot for user {user_id}: {e}");
    }

    Ok(row.id)
}

/// GET /api/v1/analyses
pub async fn handle_list_analyses(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<AnalysisRow>>, AppError> {
    let history = list_analyses(&state.db, params.user_id).await?;
    Ok(Json(history))
}

/// GET /api/v1/dashboard
pub async fn handle_dashboard(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<DashboardResponse>, AppError> {
    let total_analyses = count_analyses(&state.db, params.user_id).await?;
    let (latest_roles, latest_skills) = match latest_analysis(&state.db, params.user_id).await? {
        Some(row) => (row.role_scores.0, row.skills_found.0),
        None => (Vec::new(), Vec::new()),
    };

    Ok(Json(DashboardResponse {
        total_analyses,
        latest_roles,
        latest_skills,
    }))
}

/// GET /api/v1/charts
pub async fn handle_charts(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<ChartsResponse>, AppError> {
    let snapshot = resolve_snapshot(
        state.sessions.as_ref(),
        &state.db,
        &state.taxonomy,
        params.user_id,
    )
    .await?;

    let (roles_chart, skills_chart) = match snapshot {
        Some(s) => (Some(s.charts.roles_chart), Some(s.charts.skills_chart)),
        None => (None, None),
    };
    Ok(Json(ChartsResponse {
        roles_chart,
        skills_chart,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkbox_values() {
        assert!(is_checked("on"));
        assert!(is_checked(""));
        assert!(is_checked("true"));
        assert!(!is_checked("off"));
        assert!(!is_checked(" False "));
        assert!(!is_checked("0"));
    }
}
