//! Insight Engine: derives the full report for one analysis.
//!
//! `compute_insights` is a pure function of (SkillSet, ranked RoleScores, Taxonomy).
//! Persisted analyses store only the first two, and the bundle is rebuilt from
//! them on demand, so nothing in here may depend on hidden state.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::analysis::scorer::RoleScore;
use crate::analysis::taxonomy::{Course, Taxonomy};

const MAX_STRENGTHS: usize = 5;
const MAX_WEAKNESSES: usize = 5;
const MAX_TRENDING: usize = 5;
const LEARNING_PATH_ROLES: usize = 3;
const LEARNING_STEPS_PER_ROLE: usize = 3;
const COURSES_PER_ROLE: usize = 2;

/// Every detected skill gets this label; there is no real proficiency inference.
pub const DEFAULT_PROFICIENCY: &str = "Intermediate";

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGap {
    pub role: String,
    pub missing: Vec<String>,
    pub count: usize,
}

/// A skill and the number of roles that require it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillDemand {
    pub skill: String,
    pub roles: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningPath {
    pub role: String,
    pub steps: Vec<String>,
    pub courses: Vec<Course>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillProficiency {
    pub skill: String,
    pub level: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleComparison {
    pub role: String,
    pub score: u32,
    pub gap_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightBundle {
    /// 0 – 100, share of the whole vocabulary found in the document.
    pub resume_score: u32,
    /// One entry per taxonomy role, in definition order.
    pub skill_gaps: Vec<SkillGap>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<SkillDemand>,
    /// Top ranked roles only.
    pub learning_paths: Vec<LearningPath>,
    pub trending_skills: Vec<SkillDemand>,
    pub proficiency: Vec<SkillProficiency>,
    /// One entry per ranked role, in ranking order.
    pub role_comparison: Vec<RoleComparison>,
    pub feedback: String,
}

impl InsightBundle {
    pub fn gap_for(&self, role: &str) -> Option<&SkillGap> {
        self.skill_gaps.iter().find(|g| g.role == role)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Feedback bands
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackBand {
    /// [0, 30)
    NeedsFoundations,
    /// [30, 60)
    BuildingMomentum,
    /// [60, 80)
    Strong,
    /// [80, 100]
    Excellent,
}

impl FeedbackBand {
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s < 30 => FeedbackBand::NeedsFoundations,
            s if s < 60 => FeedbackBand::BuildingMomentum,
            s if s < 80 => FeedbackBand::Strong,
            _ => FeedbackBand::Excellent,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            FeedbackBand::NeedsFoundations => {
                "Your resume needs more skill keywords. Focus on learning foundational skills."
            }
            FeedbackBand::BuildingMomentum => {
                "Good progress! Build a portfolio with projects to strengthen your profile."
            }
            FeedbackBand::Strong => "Strong resume! Focus on specialization in your target role.",
            FeedbackBand::Excellent => {
                "Excellent! You have a well-rounded skill set. Keep learning advanced topics."
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Core derivation
// ────────────────────────────────────────────────────────────────────────────

/// Builds the insight bundle for one analysis.
///
/// `ranked` is the scorer output after filtering and capping; it drives
/// `learning_paths` and `role_comparison`. Gaps, weaknesses and trends always
/// cover every taxonomy role.
pub fn compute_insights(skills: &[String], ranked: &[RoleScore], taxonomy: &Taxonomy) -> InsightBundle {
    let resume_score = compute_resume_score(skills.len(), taxonomy.vocabulary.len());

    let skill_gaps: Vec<SkillGap> = taxonomy
        .roles
        .iter()
        .map(|role| {
            let missing: Vec<String> = role
                .required_skills
                .iter()
                .filter(|s| !skills.contains(s))
                .cloned()
                .collect();
            SkillGap {
                role: role.name.clone(),
                count: missing.len(),
                missing,
            }
        })
        .collect();

    let strengths = skills.iter().take(MAX_STRENGTHS).cloned().collect();

    let weaknesses = rank_by_frequency(
        skill_gaps.iter().flat_map(|g| g.missing.iter()),
        MAX_WEAKNESSES,
    );

    let trending_skills = rank_by_frequency(
        taxonomy.roles.iter().flat_map(|r| r.required_skills.iter()),
        MAX_TRENDING,
    );

    let learning_paths = ranked
        .iter()
        .take(LEARNING_PATH_ROLES)
        .map(|rs| {
            let steps = skill_gaps
                .iter()
                .find(|g| g.role == rs.role)
                .map(|g| {
                    g.missing
                        .iter()
                        .take(LEARNING_STEPS_PER_ROLE)
                        .map(|s| format!("Learn {s}"))
                        .collect()
                })
                .unwrap_or_default();
            let courses = taxonomy
                .role(&rs.role)
                .map(|r| r.courses.iter().take(COURSES_PER_ROLE).cloned().collect())
                .unwrap_or_default();
            LearningPath {
                role: rs.role.clone(),
                steps,
                courses,
            }
        })
        .collect();

    let proficiency = skills
        .iter()
        .map(|s| SkillProficiency {
            skill: s.clone(),
            level: DEFAULT_PROFICIENCY.to_string(),
        })
        .collect();

    let role_comparison = ranked
        .iter()
        .map(|rs| RoleComparison {
            role: rs.role.clone(),
            score: rs.score,
            gap_count: skill_gaps
                .iter()
                .find(|g| g.role == rs.role)
                .map(|g| g.count)
                .unwrap_or(0),
        })
        .collect();

    InsightBundle {
        resume_score,
        skill_gaps,
        strengths,
        weaknesses,
        learning_paths,
        trending_skills,
        proficiency,
        role_comparison,
        feedback: FeedbackBand::from_score(resume_score).message().to_string(),
    }
}

/// `floor(100 * found / vocabulary)`, 0 for an empty vocabulary.
pub fn compute_resume_score(found: usize, vocabulary: usize) -> u32 {
    if vocabulary == 0 {
        return 0;
    }
    (found.min(vocabulary) * 100 / vocabulary) as u32
}

/// Counts occurrences, then ranks descending with first-seen order breaking ties.
fn rank_by_frequency<'a>(items: impl Iterator<Item = &'a String>, limit: usize) -> Vec<SkillDemand> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for item in items {
        let count = counts.entry(item.as_str()).or_insert(0);
        if *count == 0 {
            order.push(item.as_str());
        }
        *count += 1;
    }

    let mut ranked: Vec<SkillDemand> = order
        .into_iter()
        .map(|skill| SkillDemand {
            skill: skill.to_string(),
            roles: counts[skill],
        })
        .collect();
    ranked.sort_by(|a, b| b.roles.cmp(&a.roles));
    ranked.truncate(limit);
    ranked
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::scorer::{rank_roles, RoleFilter, RoleLimit};
    use crate::analysis::taxonomy::reference_taxonomy;

    fn skills(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn scenario() -> (Vec<String>, Vec<RoleScore>, Taxonomy) {
        let t = reference_taxonomy();
        let found = skills(&["python", "sql", "machine learning"]);
        let ranked = rank_roles(&found, &t.roles, &RoleFilter::default());
        (found, ranked, t)
    }

    #[test]
    fn test_resume_score_scenario() {
        let (found, ranked, t) = scenario();
        let bundle = compute_insights(&found, &ranked, &t);
        // 3 of 12 → 25
        assert_eq!(bundle.resume_score, 25);
        assert_eq!(bundle.feedback, FeedbackBand::NeedsFoundations.message());
    }

    #[test]
    fn test_skill_gaps_cover_every_role_in_definition_order() {
        let (found, ranked, t) = scenario();
        let bundle = compute_insights(&found, &ranked, &t);
        assert_eq!(
            bundle.skill_gaps,
            vec![
                SkillGap {
                    role: "Software Developer".into(),
                    missing: skills(&["java", "c++"]),
                    count: 2
                },
                SkillGap {
                    role: "Web Developer".into(),
                    missing: skills(&["html", "css", "javascript", "flask"]),
                    count: 4
                },
                SkillGap {
                    role: "Data Scientist".into(),
                    missing: skills(&["data science"]),
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn test_strengths_are_first_five() {
        let t = reference_taxonomy();
        let found = skills(&["python", "java", "c", "c++", "html", "css"]);
        let bundle = compute_insights(&found, &[], &t);
        assert_eq!(bundle.strengths, skills(&["python", "java", "c", "c++", "html"]));
    }

    #[test]
    fn test_weaknesses_rank_by_role_count_then_first_seen() {
        let t = reference_taxonomy();
        let bundle = compute_insights(&[], &[], &t);
        // python is required by two roles, everything else by one.
        let names: Vec<_> = bundle.weaknesses.iter().map(|w| w.skill.as_str()).collect();
        assert_eq!(names, vec!["python", "java", "c++", "html", "css"]);
        assert_eq!(bundle.weaknesses[0].roles, 2);
        assert_eq!(bundle.weaknesses[1].roles, 1);
    }

    #[test]
    fn test_trending_skills() {
        let (found, ranked, t) = scenario();
        let bundle = compute_insights(&found, &ranked, &t);
        assert_eq!(
            bundle.trending_skills[0],
            SkillDemand { skill: "python".into(), roles: 2 }
        );
        assert_eq!(bundle.trending_skills.len(), 5);
        // everything else is required once; first-seen order decides
        assert_eq!(bundle.trending_skills[1].skill, "java");
        assert_eq!(bundle.trending_skills[1].roles, 1);
        assert_eq!(bundle.trending_skills[4].skill, "css");
    }

    #[test]
    fn test_learning_paths_follow_ranking() {
        let (found, ranked, t) = scenario();
        let bundle = compute_insights(&found, &ranked, &t);
        let roles: Vec<_> = bundle.learning_paths.iter().map(|p| p.role.as_str()).collect();
        assert_eq!(roles, vec!["Data Scientist", "Software Developer", "Web Developer"]);
        assert_eq!(bundle.learning_paths[0].steps, vec!["Learn data science"]);
        assert_eq!(bundle.learning_paths[2].steps.len(), 3);
        assert!(bundle.learning_paths.iter().all(|p| p.courses.len() == 2));
    }

    #[test]
    fn test_learning_paths_respect_cap() {
        let t = reference_taxonomy();
        let found = skills(&["python"]);
        let filter = RoleFilter { min_score: 0, limit: RoleLimit::Top1 };
        let ranked = rank_roles(&found, &t.roles, &filter);
        let bundle = compute_insights(&found, &ranked, &t);
        assert_eq!(bundle.learning_paths.len(), 1);
        assert_eq!(bundle.role_comparison.len(), 1);
        // gaps still describe every role
        assert_eq!(bundle.skill_gaps.len(), 3);
    }

    #[test]
    fn test_proficiency_is_uniform() {
        let (found, ranked, t) = scenario();
        let bundle = compute_insights(&found, &ranked, &t);
        assert_eq!(bundle.proficiency.len(), 3);
        assert!(bundle.proficiency.iter().all(|p| p.level == DEFAULT_PROFICIENCY));
    }

    #[test]
    fn test_role_comparison_records() {
        let (found, ranked, t) = scenario();
        let bundle = compute_insights(&found, &ranked, &t);
        assert_eq!(
            bundle.role_comparison[0],
            RoleComparison { role: "Data Scientist".into(), score: 75, gap_count: 1 }
        );
        assert_eq!(bundle.role_comparison[1].gap_count, 2);
    }

    #[test]
    fn test_empty_inputs_are_total() {
        let t = reference_taxonomy();
        let bundle = compute_insights(&[], &[], &t);
        assert_eq!(bundle.resume_score, 0);
        assert!(bundle.strengths.is_empty());
        assert!(bundle.learning_paths.is_empty());
        assert!(bundle.role_comparison.is_empty());
        assert!(bundle.proficiency.is_empty());
    }

    #[test]
    fn test_feedback_band_boundaries() {
        use FeedbackBand::*;
        let cases = [
            (0, NeedsFoundations),
            (29, NeedsFoundations),
            (30, BuildingMomentum),
            (59, BuildingMomentum),
            (60, Strong),
            (79, Strong),
            (80, Excellent),
            (100, Excellent),
        ];
        for (score, band) in cases {
            assert_eq!(FeedbackBand::from_score(score), band, "score {score}");
        }
    }

    #[test]
    fn test_resume_score_monotone() {
        let t = reference_taxonomy();
        let mut found = Vec::new();
        let mut last = compute_insights(&found, &[], &t).resume_score;
        for skill in &t.vocabulary {
            found.push(skill.clone());
            let score = compute_insights(&found, &[], &t).resume_score;
            assert!(score >= last);
            last = score;
        }
        assert_eq!(last, 100);
    }

    #[test]
    fn test_resume_score_empty_vocabulary() {
        assert_eq!(compute_resume_score(0, 0), 0);
    }

    #[test]
    fn test_bundle_json_round_trip_through_record_fields() {
        let (found, ranked, t) = scenario();
        let original = compute_insights(&found, &ranked, &t);

        let stored_skills = serde_json::to_string(&found).unwrap();
        let stored_roles = serde_json::to_string(&ranked).unwrap();
        let reloaded_skills: Vec<String> = serde_json::from_str(&stored_skills).unwrap();
        let reloaded_roles: Vec<RoleScore> = serde_json::from_str(&stored_roles).unwrap();

        assert_eq!(compute_insights(&reloaded_skills, &reloaded_roles, &t), original);
    }
}
