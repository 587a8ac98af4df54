pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::catalog::handlers as catalog;
use crate::chat::handlers as chat;
use crate::report::handlers as report;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis API
        .route(
            "/api/v1/analyses",
            post(analysis::handle_create_analysis).get(analysis::handle_list_analyses),
        )
        .route("/api/v1/dashboard", get(analysis::handle_dashboard))
        .route("/api/v1/charts", get(analysis::handle_charts))
        // Report API
        .route("/api/v1/report", get(report::handle_report_preview))
        .route(
            "/api/v1/report/download",
            get(report::handle_report_download),
        )
        // Chat API
        .route("/api/v1/chat", post(chat::handle_chat))
        // Catalog API
        .route("/api/v1/catalog/skills", get(catalog::handle_skills))
        .route("/api/v1/catalog/roles", get(catalog::handle_roles))
        .route("/api/v1/catalog/courses", get(catalog::handle_courses))
        .route("/api/v1/catalog/jobs", get(catalog::handle_jobs))
        .with_state(state)
}
