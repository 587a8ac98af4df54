//! Intent cascade: keyword tables and the ordered classifier.
//!
//! Order matters: the first rule that matches wins, so e.g. "what courses
//! should I take?" is a resume-analysis question because it contains "what".

use serde::Serialize;

const CAREER_KEYWORDS: &[&str] = &[
    "become",
    "how to become",
    "want to be",
    "i want to be",
    "want to become",
    "how do i become",
    "path to",
    "career in",
];
const CAREER_PREFIX: &str = "how to";

const ANALYSIS_KEYWORDS: &[&str] = &[
    "detect",
    "skill",
    "skills",
    "found",
    "score",
    "resume analysis",
    "what",
    "my resume",
];

const ROLE_KEYWORDS: &[&str] = &[
    "role",
    "job",
    "match",
    "which role",
    "best role",
    "suitable",
    "fit",
];

const GAP_KEYWORDS: &[&str] = &[
    "gap",
    "learn",
    "missing",
    "improve",
    "need",
    "should i learn",
    "what to learn",
];

const ADVICE_KEYWORDS: &[&str] = &[
    "advice",
    "help",
    "how do i",
    "tips",
    "improve",
    "better",
    "progress",
];

const MARKET_KEYWORDS: &[&str] = &[
    "market",
    "demand",
    "trend",
    "popular",
    "future",
    "growing",
    "industry",
];

const LEARNING_KEYWORDS: &[&str] = &["course", "learning", "study", "tutorial", "roadmap", "path"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Greeting,
    CareerGoal,
    ResumeAnalysis,
    RoleMatching,
    SkillGap,
    GeneralAdvice,
    MarketTrends,
    Learning,
    Fallback,
}

fn contains_any(message: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| message.contains(kw))
}

/// Classifies a lower-cased, trimmed message.
pub fn classify(message: &str) -> Intent {
    if message.is_empty() {
        Intent::Greeting
    } else if contains_any(message, CAREER_KEYWORDS) || message.starts_with(CAREER_PREFIX) {
        Intent::CareerGoal
    } else if contains_any(message, ANALYSIS_KEYWORDS) {
        Intent::ResumeAnalysis
    } else if contains_any(message, ROLE_KEYWORDS) {
        Intent::RoleMatching
    } else if contains_any(message, GAP_KEYWORDS) {
        Intent::SkillGap
    } else if contains_any(message, ADVICE_KEYWORDS) {
        Intent::GeneralAdvice
    } else if contains_any(message, MARKET_KEYWORDS) {
        Intent::MarketTrends
    } else if contains_any(message, LEARNING_KEYWORDS) {
        Intent::Learning
    } else {
        Intent::Fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_greeting() {
        assert_eq!(classify(""), Intent::Greeting);
    }

    #[test]
    fn test_each_rule_reachable() {
        let cases = [
            ("how to become a data scientist", Intent::CareerGoal),
            ("how to get hired", Intent::CareerGoal),
            ("i'd like a career in tech", Intent::CareerGoal),
            ("detect anything?", Intent::ResumeAnalysis),
            ("which role suits me", Intent::RoleMatching),
            ("am i missing anything", Intent::SkillGap),
            ("any tips?", Intent::GeneralAdvice),
            ("is the market hot", Intent::MarketTrends),
            ("recommend a course", Intent::Learning),
            ("hello there", Intent::Fallback),
        ];
        for (msg, intent) in cases {
            assert_eq!(classify(msg), intent, "{msg}");
        }
    }

    #[test]
    fn test_earlier_rules_shadow_later_ones() {
        // "what" puts this in the analysis bucket before "course" is considered.
        assert_eq!(classify("what courses should i take?"), Intent::ResumeAnalysis);
        // "path to" is a career phrase even though "path" is a learning keyword.
        assert_eq!(classify("path to web developer"), Intent::CareerGoal);
        // "improve" is both a gap and an advice keyword; gap comes first.
        assert_eq!(classify("improve my profile"), Intent::SkillGap);
        // "fit" makes this role matching before the trend rule.
        assert_eq!(classify("do i fit the market"), Intent::RoleMatching);
    }
}
