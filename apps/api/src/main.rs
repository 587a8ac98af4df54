mod analysis;
mod catalog;
mod chat;
mod config;
mod db;
mod errors;
mod models;
mod report;
mod routes;
mod session;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::DefaultBodyLimit;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::Taxonomy;
use crate::config::Config;
use crate::db::create_pool;
use crate::routes::build_router;
use crate::session::RedisSessionStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SkillScope API v{}", env!("CARGO_PKG_VERSION"));

    // Load the skill/role taxonomy
    let taxonomy = Arc::new(Taxonomy::load(config.taxonomy_path.as_deref())?);

    // Initialize PostgreSQL (runs migrations)
    let db = create_pool(&config.database_url).await?;

    // Initialize Redis-backed session cache
    let redis = redis::Client::open(config.redis_url.clone())?;
    let sessions = Arc::new(RedisSessionStore::new(redis, config.session_ttl_secs));
    info!(
        "Session cache initialized (ttl {}s)",
        config.session_ttl_secs
    );

    // Build app state
    let state = AppState {
        db,
        taxonomy,
        sessions,
    };

    // Build router
    let app = build_router(state)
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict CORS origins once the frontend host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
