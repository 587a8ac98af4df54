use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::analysis::scorer::RoleScore;

/// One stored submission. `role_scores` is the ranking as the user saw it,
/// after the minimum-score filter and result cap.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AnalysisRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub filename: String,
    pub skills_found: Json<Vec<String>>,
    pub role_scores: Json<Vec<RoleScore>>,
    pub created_at: DateTime<Utc>,
}
