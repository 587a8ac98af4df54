use axum::{extract::State, Json};

use crate::catalog::{
    course_catalog, job_openings, role_entries, skill_library, RoleCourses, RoleEntry,
    RoleOpenings, SkillLibrary,
};
use crate::state::AppState;

/// GET /api/v1/catalog/skills
pub async fn handle_skills(State(state): State<AppState>) -> Json<SkillLibrary> {
    Json(skill_library(&state.taxonomy))
}

/// GET /api/v1/catalog/roles
pub async fn handle_roles(State(state): State<AppState>) -> Json<Vec<RoleEntry>> {
    Json(role_entries(&state.taxonomy))
}

/// GET /api/v1/catalog/courses
pub async fn handle_courses(State(state): State<AppState>) -> Json<Vec<RoleCourses>> {
    Json(course_catalog(&state.taxonomy))
}

/// GET /api/v1/catalog/jobs
pub async fn handle_jobs(State(state): State<AppState>) -> Json<Vec<RoleOpenings>> {
    Json(job_openings(&state.taxonomy))
}
