//! Catalog views over the taxonomy: skill library, role requirements,
//! learning resources and job-search links. Read-only, no per-user state.

pub mod handlers;

use serde::Serialize;

use crate::analysis::taxonomy::{Course, JobOpening, Taxonomy};

#[derive(Debug, Serialize)]
pub struct RoleRequirement {
    pub role: String,
    pub required_skills: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SkillLibrary {
    pub skills: Vec<String>,
    pub roles: Vec<RoleRequirement>,
}

#[derive(Debug, Serialize)]
pub struct RoleEntry {
    pub role: String,
    pub required_skills: Vec<String>,
    pub courses: Vec<Course>,
}

#[derive(Debug, Serialize)]
pub struct RoleCourses {
    pub role: String,
    pub courses: Vec<Course>,
}

#[derive(Debug, Serialize)]
pub struct RoleOpenings {
    pub role: String,
    pub openings: Vec<JobOpening>,
}

pub fn skill_library(taxonomy: &Taxonomy) -> SkillLibrary {
    SkillLibrary {
        skills: taxonomy.vocabulary.clone(),
        roles: taxonomy
            .roles
            .iter()
            .map(|r| RoleRequirement {
                role: r.name.clone(),
                required_skills: r.required_skills.clone(),
            })
            .collect(),
    }
}

pub fn role_entries(taxonomy: &Taxonomy) -> Vec<RoleEntry> {
    taxonomy
        .roles
        .iter()
        .map(|r| RoleEntry {
            role: r.name.clone(),
            required_skills: r.required_skills.clone(),
            courses: r.courses.clone(),
        })
        .collect()
}

/// Roles without any course are left out.
pub fn course_catalog(taxonomy: &Taxonomy) -> Vec<RoleCourses> {
    taxonomy
        .roles
        .iter()
        .filter(|r| !r.courses.is_empty())
        .map(|r| RoleCourses {
            role: r.name.clone(),
            courses: r.courses.clone(),
        })
        .collect()
}

/// Roles without any opening are left out.
pub fn job_openings(taxonomy: &Taxonomy) -> Vec<RoleOpenings> {
    taxonomy
        .roles
        .iter()
        .filter(|r| !r.openings.is_empty())
        .map(|r| RoleOpenings {
            role: r.name.clone(),
            openings: r.openings.clone(),
        })
        .collect()
}
