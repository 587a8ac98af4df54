//! Role scoring: percentage of each role's required skills present in a SkillSet.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::analysis::taxonomy::RoleDefinition;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleScore {
    pub role: String,
    /// 0 – 100
    pub score: u32,
}

/// How many ranked roles to keep after filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleLimit {
    #[default]
    All,
    Top1,
    Top3,
}

impl RoleLimit {
    /// Form value parsing: "top1", "top3", anything else means all roles.
    pub fn from_form_value(value: &str) -> Self {
        match value.trim() {
            "top1" => RoleLimit::Top1,
            "top3" => RoleLimit::Top3,
            _ => RoleLimit::All,
        }
    }

    fn cap(self) -> Option<usize> {
        match self {
            RoleLimit::All => None,
            RoleLimit::Top1 => Some(1),
            RoleLimit::Top3 => Some(3),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleFilter {
    pub min_score: u32,
    pub limit: RoleLimit,
}

impl RoleFilter {
    /// Builds a filter from raw form fields. A missing or non-numeric
    /// minimum score silently becomes 0.
    pub fn from_form(min_score: Option<&str>, max_roles: Option<&str>) -> Self {
        Self {
            min_score: min_score
                .and_then(|v| v.trim().parse::<u32>().ok())
                .unwrap_or(0),
            limit: max_roles.map(RoleLimit::from_form_value).unwrap_or_default(),
        }
    }
}

/// `floor(100 * |found ∩ required| / |required|)`, or 0 when nothing is required.
pub fn score_role(found: &[String], required: &[String]) -> u32 {
    let required: HashSet<&str> = required.iter().map(String::as_str).collect();
    if required.is_empty() {
        return 0;
    }
    let matched = found
        .iter()
        .map(String::as_str)
        .collect::<HashSet<_>>()
        .intersection(&required)
        .count();
    (matched * 100 / required.len()) as u32
}

/// Scores every role, drops those below `filter.min_score`, sorts descending
/// (stable, so ties keep role-definition order) and applies the cap.
pub fn rank_roles(found: &[String], roles: &[RoleDefinition], filter: &RoleFilter) -> Vec<RoleScore> {
    let mut ranked: Vec<RoleScore> = roles
        .iter()
        .map(|role| RoleScore {
            role: role.name.clone(),
            score: score_role(found, &role.required_skills),
        })
        .filter(|rs| rs.score >= filter.min_score)
        .collect();

    ranked.sort_by(|a, b| b.score.cmp(&a.score));

    if let Some(cap) = filter.limit.cap() {
        ranked.truncate(cap);
    }
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::taxonomy::reference_taxonomy;

    fn skills(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn role(name: &str, required: &[&str]) -> RoleDefinition {
        RoleDefinition {
            name: name.to_string(),
            required_skills: skills(required),
            courses: vec![],
            openings: vec![],
        }
    }

    #[test]
    fn test_reference_scenario_scores() {
        let t = reference_taxonomy();
        let found = skills(&["python", "sql", "machine learning"]);
        let ranked = rank_roles(&found, &t.roles, &RoleFilter::default());
        assert_eq!(
            ranked,
            vec![
                RoleScore { role: "Data Scientist".into(), score: 75 },
                RoleScore { role: "Software Developer".into(), score: 33 },
                RoleScore { role: "Web Developer".into(), score: 0 },
            ]
        );
    }

    #[test]
    fn test_score_floors() {
        // 2 of 3 → 66.67 → 66
        assert_eq!(score_role(&skills(&["a", "b"]), &skills(&["a", "b", "c"])), 66);
    }

    #[test]
    fn test_empty_required_scores_zero() {
        assert_eq!(score_role(&skills(&["python"]), &[]), 0);
    }

    #[test]
    fn test_full_match_is_100() {
        assert_eq!(score_role(&skills(&["x", "y"]), &skills(&["y", "x"])), 100);
    }

    #[test]
    fn test_ties_keep_definition_order() {
        let roles = vec![role("First", &["a"]), role("Second", &["b"]), role("Third", &["a", "b"])];
        let ranked = rank_roles(&skills(&[]), &roles, &RoleFilter::default());
        let names: Vec<_> = ranked.iter().map(|r| r.role.as_str()).collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);

        let ranked = rank_roles(&skills(&["a", "b"]), &roles, &RoleFilter::default());
        let names: Vec<_> = ranked.iter().map(|r| r.role.as_str()).collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_min_score_filter_then_cap() {
        let t = reference_taxonomy();
        let found = skills(&["python", "sql", "machine learning"]);

        let filter = RoleFilter { min_score: 30, limit: RoleLimit::All };
        assert_eq!(rank_roles(&found, &t.roles, &filter).len(), 2);

        let filter = RoleFilter { min_score: 0, limit: RoleLimit::Top1 };
        let ranked = rank_roles(&found, &t.roles, &filter);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].role, "Data Scientist");

        let filter = RoleFilter { min_score: 80, limit: RoleLimit::Top3 };
        assert!(rank_roles(&found, &t.roles, &filter).is_empty());
    }

    #[test]
    fn test_filter_from_form_defaults() {
        let f = RoleFilter::from_form(Some("abc"), Some("top3"));
        assert_eq!(f.min_score, 0);
        assert_eq!(f.limit, RoleLimit::Top3);

        let f = RoleFilter::from_form(Some(" 40 "), Some("everything"));
        assert_eq!(f.min_score, 40);
        assert_eq!(f.limit, RoleLimit::All);

        assert_eq!(RoleFilter::from_form(None, None), RoleFilter::default());
    }
}
