//! Analysis pipeline: text → SkillSet → ranked roles → insights + chart data.

use serde::{Deserialize, Serialize};

use crate::analysis::extractor::extract_skills;
use crate::analysis::insights::{compute_insights, InsightBundle};
use crate::analysis::scorer::{rank_roles, RoleFilter, RoleScore};
use crate::analysis::taxonomy::Taxonomy;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RolesChart {
    pub labels: Vec<String>,
    pub scores: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillsChart {
    pub labels: Vec<String>,
    pub counts: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub roles_chart: RolesChart,
    pub skills_chart: SkillsChart,
}

impl ChartData {
    pub fn from_results(skills: &[String], roles: &[RoleScore]) -> Self {
        Self {
            roles_chart: RolesChart {
                labels: roles.iter().map(|r| r.role.clone()).collect(),
                scores: roles.iter().map(|r| r.score).collect(),
            },
            // Each detected skill counts once.
            skills_chart: SkillsChart {
                labels: skills.to_vec(),
                counts: vec![1; skills.len()],
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisOutcome {
    pub skills: Vec<String>,
    pub roles: Vec<RoleScore>,
    pub insights: InsightBundle,
    pub charts: ChartData,
}

/// Runs the pure part of a submission over already-extracted document text.
pub fn analyze_text(text: &str, taxonomy: &Taxonomy, filter: &RoleFilter) -> AnalysisOutcome {
    let skills = extract_skills(text, &taxonomy.vocabulary);
    rebuild_outcome(skills, None, taxonomy, filter)
}

/// Rebuilds an outcome from a stored SkillSet. When `roles` is given it is
/// used as-is (a persisted, already filtered ranking); otherwise roles are
/// ranked with `filter`.
pub fn rebuild_outcome(
    skills: Vec<String>,
    roles: Option<Vec<RoleScore>>,
    taxonomy: &Taxonomy,
    filter: &RoleFilter,
) -> AnalysisOutcome {
    let roles = roles.unwrap_or_else(|| rank_roles(&skills, &taxonomy.roles, filter));
    let insights = compute_insights(&skills, &roles, taxonomy);
    let charts = ChartData::from_results(&skills, &roles);
    AnalysisOutcome {
        skills,
        roles,
        insights,
        charts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::scorer::RoleLimit;
    use crate::analysis::taxonomy::reference_taxonomy;

    #[test]
    fn test_analyze_text_scenario() {
        let t = reference_taxonomy();
        let outcome = analyze_text(
            "Skills: Python, SQL, Machine Learning",
            &t,
            &RoleFilter::default(),
        );
        assert_eq!(outcome.skills, vec!["python", "c", "sql", "machine learning"]);
        assert_eq!(outcome.roles[0].score, 75);
        assert_eq!(outcome.charts.roles_chart.labels[0], "Data Scientist");
        assert_eq!(outcome.charts.roles_chart.scores, vec![75, 33, 0]);
        assert_eq!(outcome.charts.skills_chart.counts, vec![1, 1, 1, 1]);
        assert_eq!(outcome.insights.resume_score, 33);
    }

    #[test]
    fn test_rebuild_from_stored_roles_matches_original() {
        let t = reference_taxonomy();
        let filter = RoleFilter { min_score: 10, limit: RoleLimit::Top3 };
        let original = analyze_text("python and java and html", &t, &filter);
        let rebuilt = rebuild_outcome(
            original.skills.clone(),
            Some(original.roles.clone()),
            &t,
            &RoleFilter::default(),
        );
        assert_eq!(rebuilt, original);
    }

    #[test]
    fn test_empty_text_outcome() {
        let t = reference_taxonomy();
        let outcome = analyze_text("", &t, &RoleFilter { min_score: 1, limit: RoleLimit::All });
        assert!(outcome.skills.is_empty());
        assert!(outcome.roles.is_empty());
        assert_eq!(outcome.insights.resume_score, 0);
    }
}
