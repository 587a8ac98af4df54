//! Session-scoped cache of the last analysis a user ran.
//!
//! Charts, the report preview, the PDF download and the chat assistant all read
//! the same `SessionSnapshot`. It is resolved once per request and handed to
//! those consumers as a plain value.

use async_trait::async_trait;
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::analysis::insights::InsightBundle;
use crate::analysis::pipeline::{rebuild_outcome, AnalysisOutcome, ChartData};
use crate::analysis::records::latest_analysis;
use crate::analysis::scorer::RoleFilter;
use crate::analysis::taxonomy::Taxonomy;
use crate::errors::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub skills: Vec<String>,
    pub charts: ChartData,
    pub insights: InsightBundle,
}

impl From<AnalysisOutcome> for SessionSnapshot {
    fn from(outcome: AnalysisOutcome) -> Self {
        Self {
            skills: outcome.skills,
            charts: outcome.charts,
            insights: outcome.insights,
        }
    }
}

/// Storage backend for session snapshots. Carried in `AppState` as
/// `Arc<dyn SessionStore>`.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self, user_id: Uuid) -> Result<Option<SessionSnapshot>, AppError>;
    async fn save(&self, user_id: Uuid, snapshot: &SessionSnapshot) -> Result<(), AppError>;
}

fn snapshot_key(user_id: Uuid) -> String {
    format!("session:{user_id}:analysis")
}

// ────────────────────────────────────────────────────────────────────────────
// Redis backend
// ────────────────────────────────────────────────────────────────────────────

pub struct RedisSessionStore {
    client: redis::Client,
    ttl_secs: u64,
}

impl RedisSessionStore {
    pub fn new(client: redis::Client, ttl_secs: u64) -> Self {
        Self { client, ttl_secs }
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn load(&self, user_id: Uuid) -> Result<Option<SessionSnapshot>, AppError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let raw: Option<String> = conn.get(snapshot_key(user_id)).await?;
        raw.map(|raw| serde_json::from_str(&raw))
            .transpose()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Corrupt session snapshot: {e}")))
    }

    async fn save(&self, user_id: Uuid, snapshot: &SessionSnapshot) -> Result<(), AppError> {
        let payload = serde_json::to_string(snapshot)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to encode snapshot: {e}")))?;
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.set_ex::<_, _, ()>(snapshot_key(user_id), payload, self.ttl_secs)
            .await?;
        debug!("Cached session snapshot for user {user_id}");
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Resolution
// ────────────────────────────────────────────────────────────────────────────

/// Returns the user's last analysis: the cached snapshot if there is one,
/// otherwise a snapshot rebuilt from their most recent stored analysis.
///
/// A failing cache is logged and skipped rather than failing the request.
pub async fn resolve_snapshot(
    store: &dyn SessionStore,
    pool: &PgPool,
    taxonomy: &Taxonomy,
    user_id: Uuid,
) -> Result<Option<SessionSnapshot>, AppError> {
    match store.load(user_id).await {
        Ok(Some(snapshot)) => return Ok(Some(snapshot)),
        Ok(None) => {}
        Err(e) => warn!("Session cache unavailable for user {user_id}: {e}"),
    }

    let latest = latest_analysis(pool, user_id)
        .await
        .map_err(AppError::Internal)?;

    Ok(latest.map(|row| {
        debug!("Rebuilding session snapshot from analysis {}", row.id);
        rebuild_outcome(
            row.skills_found.0,
            Some(row.role_scores.0),
            taxonomy,
            &RoleFilter::default(),
        )
        .into()
    }))
}

/// In-memory backend for handler tests.
#[cfg(test)]
#[derive(Default)]
pub struct MemorySessionStore {
    entries: tokio::sync::RwLock<std::collections::HashMap<Uuid, SessionSnapshot>>,
}

#[cfg(test)]
#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self, user_id: Uuid) -> Result<Option<SessionSnapshot>, AppError> {
        Ok(self.entries.read().await.get(&user_id).cloned())
    }

    async fn save(&self, user_id: Uuid, snapshot: &SessionSnapshot) -> Result<(), AppError> {
        self.entries.write().await.insert(user_id, snapshot.clone());
        Ok(())
    }
}
