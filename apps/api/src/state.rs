use std::sync::Arc;

use sqlx::PgPool;

use crate::analysis::Taxonomy;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Read-only after startup.
    pub taxonomy: Arc<Taxonomy>,
    /// Session snapshot cache. Default: RedisSessionStore.
    pub sessions: Arc<dyn SessionStore>,
}
