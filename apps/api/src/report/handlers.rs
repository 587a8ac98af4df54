use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};

use crate::analysis::handlers::UserIdQuery;
use crate::analysis::insights::InsightBundle;
use crate::errors::AppError;
use crate::report::{render_report, REPORT_FILENAME};
use crate::session::resolve_snapshot;
use crate::state::AppState;

/// GET /api/v1/report
/// The last analysis' insights, or `null` when the user has none.
pub async fn handle_report_preview(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Option<InsightBundle>>, AppError> {
    let snapshot = resolve_snapshot(
        state.sessions.as_ref(),
        &state.db,
        &state.taxonomy,
        params.user_id,
    )
    .await?;
    Ok(Json(snapshot.map(|s| s.insights)))
}

/// GET /api/v1/report/download
pub async fn handle_report_download(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Response, AppError> {
    let snapshot = resolve_snapshot(
        state.sessions.as_ref(),
        &state.db,
        &state.taxonomy,
        params.user_id,
    )
    .await?
    .ok_or_else(|| {
        AppError::NotFound("No analysis to report on yet. Upload and analyze a resume first.".to_string())
    })?;

    let pdf = render_report(snapshot.insights).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{REPORT_FILENAME}\""),
            ),
        ],
        pdf,
    )
        .into_response())
}
