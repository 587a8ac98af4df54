//! Skill/role taxonomy: the fixed vocabulary, role requirements, course table
//! and job-opening table every analysis is measured against.
//!
//! Loaded once at startup and shared read-only through `AppState`. The built-in
//! reference taxonomy is used unless `TAXONOMY_PATH` names a JSON file.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub title: String,
    pub url: String,
}

/// A job search link surfaced on the job-openings catalog page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobOpening {
    pub title: String,
    pub company: String,
    pub location: String,
    pub search_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleDefinition {
    pub name: String,
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub courses: Vec<Course>,
    #[serde(default)]
    pub openings: Vec<JobOpening>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Taxonomy {
    pub vocabulary: Vec<String>,
    pub roles: Vec<RoleDefinition>,
}

impl Taxonomy {
    /// Builds a taxonomy, lowercasing and deduplicating every skill token while
    /// keeping first-seen order.
    pub fn new(vocabulary: Vec<String>, roles: Vec<RoleDefinition>) -> Result<Self> {
        let vocabulary = normalize_tokens(vocabulary);
        if vocabulary.is_empty() {
            bail!("taxonomy vocabulary must contain at least one skill");
        }

        let mut seen_roles = HashSet::new();
        let mut normalized_roles = Vec::with_capacity(roles.len());
        for mut role in roles {
            let name = role.name.trim().to_string();
            if name.is_empty() {
                bail!("taxonomy role names must not be empty");
            }
            if !seen_roles.insert(name.to_lowercase()) {
                bail!("duplicate taxonomy role '{name}'");
            }
            role.required_skills = normalize_tokens(role.required_skills);
            // Every required skill must be extractable.
            if let Some(unknown) = role
                .required_skills
                .iter()
                .find(|s| !vocabulary.contains(s))
            {
                bail!("role '{name}' requires '{unknown}', which is not in the vocabulary");
            }
            role.name = name;
            normalized_roles.push(role);
        }

        Ok(Self {
            vocabulary,
            roles: normalized_roles,
        })
    }

    /// Loads the taxonomy from `path`, or the reference taxonomy when `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let taxonomy = match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read taxonomy file {}", path.display()))?;
                let parsed: Taxonomy = serde_json::from_str(&raw)
                    .with_context(|| format!("Malformed taxonomy file {}", path.display()))?;
                Self::new(parsed.vocabulary, parsed.roles)?
            }
            None => reference_taxonomy(),
        };
        info!(
            "Taxonomy loaded: {} skills, {} roles",
            taxonomy.vocabulary.len(),
            taxonomy.roles.len()
        );
        Ok(taxonomy)
    }

    pub fn role(&self, name: &str) -> Option<&RoleDefinition> {
        self.roles.iter().find(|r| r.name == name)
    }

    pub fn role_names(&self) -> Vec<&str> {
        self.roles.iter().map(|r| r.name.as_str()).collect()
    }
}

fn normalize_tokens(tokens: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    tokens
        .into_iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .filter(|t| seen.insert(t.clone()))
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Reference taxonomy
// ────────────────────────────────────────────────────────────────────────────

const REFERENCE_SKILLS: &[&str] = &[
    "python",
    "java",
    "c",
    "c++",
    "html",
    "css",
    "javascript",
    "sql",
    "machine learning",
    "data science",
    "flask",
    "django",
];

/// (role, required skills, courses as (title, url), job searches as (title, company, keywords))
type RoleSeed = (
    &'static str,
    &'static [&'static str],
    &'static [(&'static str, &'static str)],
    &'static [(&'static str, &'static str, &'static str)],
);

const REFERENCE_ROLES: &[RoleSeed] = &[
    (
        "Software Developer",
        &["python", "java", "c++"],
        &[
            (
                "CS50's Introduction to Computer Science (edX)",
                "https://cs50.harvard.edu",
            ),
            (
                "Algorithms and Data Structures (Coursera)",
                "https://www.coursera.org",
            ),
        ],
        &[
            ("Python Developer", "Tech Companies", "python%20developer"),
            ("Java Developer", "Tech Companies", "java%20developer"),
            ("C++ Developer", "Tech Companies", "c%2B%2B%20developer"),
            ("Full Stack Developer", "Tech Companies", "full%20stack%20developer"),
        ],
    ),
    (
        "Web Developer",
        &["html", "css", "javascript", "flask"],
        &[
            ("The Web Developer Bootcamp (Udemy)", "https://www.udemy.com"),
            (
                "Front-End Web Development with React (Coursera)",
                "https://www.coursera.org",
            ),
        ],
        &[
            ("Frontend Developer", "Tech Companies", "frontend%20developer"),
            ("HTML/CSS Developer", "Tech Companies", "html%20css%20developer"),
            ("JavaScript Developer", "Tech Companies", "javascript%20developer"),
            ("React Developer", "Tech Companies", "react%20developer"),
        ],
    ),
    (
        "Data Scientist",
        &["python", "machine learning", "data science", "sql"],
        &[
            (
                "IBM Data Science Professional Certificate (Coursera)",
                "https://www.coursera.org",
            ),
            (
                "Machine Learning by Andrew Ng (Coursera)",
                "https://www.coursera.org",
            ),
        ],
        &[
            ("Data Scientist", "Tech/Finance Companies", "data%20scientist"),
            (
                "Machine Learning Engineer",
                "Tech Companies",
                "machine%20learning%20engineer",
            ),
            ("Data Analyst", "Tech/Business Companies", "data%20analyst"),
            ("Python Data Scientist", "Tech Companies", "python%20data%20scientist"),
        ],
    ),
];

const JOB_SEARCH_BASE: &str = "https://www.linkedin.com/jobs/search/?keywords=";

/// The reference taxonomy: 12 skills, 3 roles.
pub fn reference_taxonomy() -> Taxonomy {
    let roles = REFERENCE_ROLES
        .iter()
        .map(|(name, skills, courses, openings)| RoleDefinition {
            name: name.to_string(),
            required_skills: skills.iter().map(|s| s.to_string()).collect(),
            courses: courses
                .iter()
                .map(|(title, url)| Course {
                    title: title.to_string(),
                    url: url.to_string(),
                })
                .collect(),
            openings: openings
                .iter()
                .map(|(title, company, keywords)| JobOpening {
                    title: title.to_string(),
                    company: company.to_string(),
                    location: "Remote/Worldwide".to_string(),
                    search_url: format!("{JOB_SEARCH_BASE}{keywords}"),
                })
                .collect(),
        })
        .collect();

    Taxonomy {
        vocabulary: REFERENCE_SKILLS.iter().map(|s| s.to_string()).collect(),
        roles,
    }
}
