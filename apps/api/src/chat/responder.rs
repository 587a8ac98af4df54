//! Chat Responder: turns a classified message plus the session context into a reply.

use serde::Serialize;

use crate::analysis::insights::InsightBundle;
use crate::analysis::taxonomy::{RoleDefinition, Taxonomy};
use crate::chat::intents::{classify, Intent};
use crate::chat::similarity::{ratio, ROLE_MATCH_THRESHOLD};

const GREETING: &str = "Hello! Ask me anything about resumes, career advice, skills, job market insights, or how to improve your profile.";

const NO_ANALYSIS_PROMPT: &str = "📄 No resume analyzed yet. Upload a PDF resume and click 'Analyze' to see detailed insights about your skills, score, and career matches!";
const NO_MATCHES_PROMPT: &str = "Upload your resume to see which job roles match your skills best!";
const NO_GAPS_PROMPT: &str = "Upload and analyze a resume to get personalized skill recommendations!";

const ROADMAP_TAIL: &[&str] = &[
    "Build 2-3 portfolio projects",
    "Learn industry best practices",
    "Network and contribute to open source",
];

const ADVICE: &[&str] = &[
    "Build a strong portfolio (projects > grades)",
    "Contribute to open source",
    "Network on LinkedIn & GitHub",
    "Learn one skill deeply, then expand",
    "Get internships or freelance experience",
    "Keep your resume updated & concise",
];

const STATIC_TRENDS: &str =
    "Currently trending: Python, JavaScript, Cloud (AWS/Azure), Data Science, AI/ML, DevOps";

const CAPABILITIES: &[&str] = &[
    "📄 Resume Analysis - Ask 'What skills did you detect?'",
    "🎯 Career Guidance - Ask 'How do I become a Data Scientist?'",
    "📚 Learning - Ask 'What courses should I take?'",
    "📊 Job Matches - Ask 'Which roles match my skills?'",
    "📈 Skill Gaps - Ask 'What skills should I learn?'",
    "💡 Tips - Ask 'How do I improve my career?'",
];

/// Read-only view of the user's last analysis.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChatContext<'a> {
    pub insights: Option<&'a InsightBundle>,
    pub skills: Option<&'a [String]>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatReply {
    pub intent: Intent,
    pub reply: String,
}

/// Answers one chat message. Stateless apart from the read-only context.
pub fn respond(message: &str, context: ChatContext<'_>, taxonomy: &Taxonomy) -> ChatReply {
    let original = message.trim();
    let lowered = original.to_lowercase();
    let intent = classify(&lowered);

    let reply = match intent {
        Intent::Greeting => GREETING.to_string(),
        Intent::CareerGoal => career_reply(&lowered, taxonomy),
        Intent::ResumeAnalysis => analysis_reply(context),
        Intent::RoleMatching => role_match_reply(context),
        Intent::SkillGap => skill_gap_reply(context),
        Intent::GeneralAdvice => advice_reply(),
        Intent::MarketTrends => market_reply(context),
        Intent::Learning => learning_reply(taxonomy),
        Intent::Fallback => fallback_reply(original),
    };

    ChatReply { intent, reply }
}

/// Best similarity match above the threshold, else the first role whose
/// name appears verbatim in the message.
pub fn resolve_role<'a>(message: &str, taxonomy: &'a Taxonomy) -> Option<&'a RoleDefinition> {
    let mut best: Option<(&RoleDefinition, f64)> = None;
    for role in &taxonomy.roles {
        let score = ratio(&role.name.to_lowercase(), message);
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((role, score));
        }
    }

    match best {
        Some((role, score)) if score >= ROLE_MATCH_THRESHOLD => Some(role),
        _ => taxonomy
            .roles
            .iter()
            .find(|r| message.contains(&r.name.to_lowercase())),
    }
}

fn career_reply(message: &str, taxonomy: &Taxonomy) -> String {
    let Some(role) = resolve_role(message, taxonomy) else {
        return format!(
            "I can guide you on: {}. Which role interests you?",
            join_choices(&taxonomy.role_names())
        );
    };

    let mut reply = format!(
        "🎯 Path to {}:\n\nRequired skills: {}\n\n📚 Learning roadmap:\n",
        role.name,
        role.required_skills.join(", ")
    );
    let first_step = match role.required_skills.first() {
        Some(skill) => format!("Master fundamentals (start with {})", title_case(skill)),
        None => "Master fundamentals".to_string(),
    };
    reply.push_str(&format!("1. {first_step}\n"));
    for (i, step) in ROADMAP_TAIL.iter().enumerate() {
        reply.push_str(&format!("{}. {step}\n", i + 2));
    }

    if !role.courses.is_empty() {
        reply.push_str("\nRecommended courses:\n");
        for course in role.courses.iter().take(2) {
            reply.push_str(&format!("• {}\n", course.title));
        }
    }
    reply
}

fn analysis_reply(context: ChatContext<'_>) -> String {
    let Some(insights) = context.insights else {
        return NO_ANALYSIS_PROMPT.to_string();
    };

    let detected = context
        .skills
        .map(|s| s.len())
        .unwrap_or(insights.proficiency.len());

    let mut reply = format!(
        "📄 Resume Analysis Summary:\n\nResume Score: {}%\nSkills detected: {detected} total\n\n",
        insights.resume_score
    );
    if !insights.strengths.is_empty() {
        let top: Vec<&str> = insights.strengths.iter().take(3).map(String::as_str).collect();
        reply.push_str(&format!("💪 Strengths: {}\n", top.join(", ")));
    }
    if !insights.weaknesses.is_empty() {
        let top: Vec<&str> = insights
            .weaknesses
            .iter()
            .take(3)
            .map(|w| w.skill.as_str())
            .collect();
        reply.push_str(&format!("⚠️ Gaps: {}\n", top.join(", ")));
    }
    reply.push_str(&format!("\nFeedback: {}\n", insights.feedback));
    reply
}

fn role_match_reply(context: ChatContext<'_>) -> String {
    let comparison = match context.insights {
        Some(insights) if !insights.role_comparison.is_empty() => &insights.role_comparison,
        _ => return NO_MATCHES_PROMPT.to_string(),
    };

    let mut reply = "🏆 Your Best Matches:\n\n".to_string();
    for entry in comparison.iter().take(3) {
        reply.push_str(&format!("• {}: {}% match\n", entry.role, entry.score));
    }
    reply.push_str("\nCheck 'Detailed Report' to see full role analysis!");
    reply
}

fn skill_gap_reply(context: ChatContext<'_>) -> String {
    let insights = match context.insights {
        Some(insights) if !insights.skill_gaps.is_empty() => insights,
        _ => return NO_GAPS_PROMPT.to_string(),
    };

    // Top two compared roles; when the filter removed every role, the first
    // two gap records stand in.
    let gaps: Vec<_> = if insights.role_comparison.is_empty() {
        insights.skill_gaps.iter().take(2).collect()
    } else {
        insights
            .role_comparison
            .iter()
            .take(2)
            .filter_map(|c| insights.gap_for(&c.role))
            .collect()
    };

    let mut reply = "📈 Skill Development Path:\n\n".to_string();
    for gap in gaps.into_iter().filter(|g| !g.missing.is_empty()) {
        let next: Vec<&str> = gap.missing.iter().take(3).map(String::as_str).collect();
        reply.push_str(&format!("{}:\n• Learn: {}\n\n", gap.role, next.join(", ")));
    }
    reply.push_str("Check 'Learning Paths' in your report for courses!");
    reply
}

fn advice_reply() -> String {
    let mut reply = "💡 Career Advice:\n\n".to_string();
    for tip in ADVICE {
        reply.push_str(&format!("✅ {tip}\n"));
    }
    reply.push_str("\nWhat specific area do you want help with?");
    reply
}

fn market_reply(context: ChatContext<'_>) -> String {
    let trending = match context.insights {
        Some(insights) if !insights.trending_skills.is_empty() => &insights.trending_skills,
        _ => return STATIC_TRENDS.to_string(),
    };

    let mut reply = "📊 Trending Skills & Market Insights:\n\n🔥 Hot Skills Right Now:\n".to_string();
    for demand in trending.iter().take(5) {
        reply.push_str(&format!("• {}\n", demand.skill));
    }
    reply.push_str("\n💼 Focus on these for better job prospects!");
    reply
}

fn learning_reply(taxonomy: &Taxonomy) -> String {
    let mut reply = "🎓 Learning Paths Available:\n\n".to_string();
    for role in &taxonomy.roles {
        reply.push_str(&format!("📚 {}:\n", role.name));
        if let Some(course) = role.courses.first() {
            reply.push_str(&format!("• {}\n", course.title));
        }
    }
    reply.push_str("\nCheck 'Learning Paths' in your Detailed Report!");
    reply
}

fn fallback_reply(original: &str) -> String {
    let mut reply = "🤖 I can help with:\n\n".to_string();
    for line in CAPABILITIES {
        reply.push_str(line);
        reply.push('\n');
    }
    reply.push_str(&format!(
        "\nYour question: '{original}' - Try being more specific!"
    ));
    reply
}

/// "A, B, or C"
fn join_choices(items: &[&str]) -> String {
    match items {
        [] => String::new(),
        [only] => only.to_string(),
        [init @ .., last] => format!("{}, or {last}", init.join(", ")),
    }
}

/// Capitalizes the first letter of every word. A word starts after any
/// character that is not alphanumeric, so "data-science" becomes "Data-Science".
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut word_start = true;
    for c in s.chars() {
        if word_start {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        word_start = !c.is_alphanumeric();
    }
    out
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::pipeline::analyze_text;
    use crate::analysis::scorer::{RoleFilter, RoleLimit};
    use crate::analysis::taxonomy::reference_taxonomy;

    fn ask(message: &str, context: ChatContext<'_>) -> ChatReply {
        respond(message, context, &reference_taxonomy())
    }

    #[test]
    fn test_empty_message_greets() {
        let r = ask("   ", ChatContext::default());
        assert_eq!(r.intent, Intent::Greeting);
        assert_eq!(r.reply, GREETING);
    }

    #[test]
    fn test_become_data_scientist() {
        let r = ask("How to become a Data Scientist", ChatContext::default());
        assert_eq!(r.intent, Intent::CareerGoal);
        assert!(r.reply.contains("Path to Data Scientist"));
        assert!(r
            .reply
            .contains("Required skills: python, machine learning, data science, sql"));
        assert!(r.reply.contains("1. Master fundamentals (start with Python)"));
        assert!(r.reply.contains("4. Network and contribute to open source"));
        assert!(r
            .reply
            .contains("• IBM Data Science Professional Certificate (Coursera)"));
        assert!(r.reply.contains("• Machine Learning by Andrew Ng (Coursera)"));
        assert_eq!(r.reply.matches('•').count(), 2);
    }

    #[test]
    fn test_career_question_without_role_asks_to_choose() {
        let r = ask("How to be happy", ChatContext::default());
        assert_eq!(r.intent, Intent::CareerGoal);
        assert_eq!(
            r.reply,
            "I can guide you on: Software Developer, Web Developer, or Data Scientist. Which role interests you?"
        );
    }

    #[test]
    fn test_become_each_reference_role() {
        let cases = [
            ("How to become a Software Developer", "Path to Software Developer"),
            ("How to become a Web Developer", "Path to Web Developer"),
            ("How to become a Data Scientist", "Path to Data Scientist"),
            ("I want to become a web developer", "Path to Web Developer"),
            ("How to become a software engineer", "Path to Software Developer"),
        ];
        for (message, expected) in cases {
            let r = ask(message, ChatContext::default());
            assert_eq!(r.intent, Intent::CareerGoal, "{message}");
            assert!(r.reply.contains(expected), "{message}: {}", r.reply);
        }
    }

    #[test]
    fn test_resolve_role_substring_fallback() {
        let t = reference_taxonomy();
        // Far too long for the similarity ratio to clear the threshold.
        let msg = "i have been thinking for a very long time about whether i should \
                   eventually try to become a web developer someday";
        assert_eq!(resolve_role(msg, &t).map(|r| r.name.as_str()), Some("Web Developer"));
    }

    #[test]
    fn test_no_context_analysis_prompts_upload() {
        let r = ask("what skills did you detect", ChatContext::default());
        assert_eq!(r.intent, Intent::ResumeAnalysis);
        assert_eq!(r.reply, NO_ANALYSIS_PROMPT);
    }

    #[test]
    fn test_analysis_summary_with_context() {
        let t = reference_taxonomy();
        let outcome = analyze_text("python sql machine learning", &t, &RoleFilter::default());
        let ctx = ChatContext {
            insights: Some(&outcome.insights),
            skills: Some(&outcome.skills),
        };
        let r = respond("what is my score", ctx, &t);
        assert!(r.reply.contains("Resume Score: 33%"));
        assert!(r.reply.contains("Skills detected: 4 total"));
        assert!(r.reply.contains("Strengths: python, c, sql\n"));
        assert!(r.reply.contains("Gaps: java, c++, html"));
        assert!(r.reply.contains(&outcome.insights.feedback));
    }

    #[test]
    fn test_role_matches_with_and_without_context() {
        let t = reference_taxonomy();
        let r = respond("which role suits me", ChatContext::default(), &t);
        assert_eq!(r.reply, NO_MATCHES_PROMPT);

        let outcome = analyze_text("python sql machine learning", &t, &RoleFilter::default());
        let ctx = ChatContext {
            insights: Some(&outcome.insights),
            skills: None,
        };
        let r = respond("which role suits me", ctx, &t);
        assert!(r.reply.contains("• Data Scientist: 75% match"));
        assert!(r.reply.contains("• Software Developer: 33% match"));
    }

    #[test]
    fn test_skill_gaps_use_top_two_roles() {
        let t = reference_taxonomy();
        let outcome = analyze_text("python sql machine learning", &t, &RoleFilter::default());
        let ctx = ChatContext {
            insights: Some(&outcome.insights),
            skills: None,
        };
        let r = respond("am i missing anything", ctx, &t);
        assert_eq!(r.intent, Intent::SkillGap);
        assert!(r.reply.contains("Data Scientist:\n• Learn: data science"));
        assert!(r.reply.contains("Software Developer:\n• Learn: java, c++"));
        assert!(!r.reply.contains("Web Developer"));
    }

    #[test]
    fn test_skill_gaps_fall_back_when_all_roles_filtered() {
        let t = reference_taxonomy();
        let filter = RoleFilter { min_score: 90, limit: RoleLimit::All };
        let outcome = analyze_text("python", &t, &filter);
        assert!(outcome.insights.role_comparison.is_empty());
        let ctx = ChatContext {
            insights: Some(&outcome.insights),
            skills: None,
        };
        let r = respond("am i missing anything", ctx, &t);
        assert!(r.reply.contains("Software Developer:\n• Learn: java, c++"));
        assert!(r.reply.contains("Web Developer:\n• Learn: html, css, javascript"));
    }

    #[test]
    fn test_advice_is_context_free() {
        let r = ask("any tips?", ChatContext::default());
        assert_eq!(r.intent, Intent::GeneralAdvice);
        assert!(r.reply.starts_with("💡 Career Advice:"));
        assert_eq!(r.reply.matches('✅').count(), ADVICE.len());
    }

    #[test]
    fn test_market_static_and_contextual() {
        let t = reference_taxonomy();
        let r = respond("is the market hot", ChatContext::default(), &t);
        assert_eq!(r.reply, STATIC_TRENDS);

        let outcome = analyze_text("html", &t, &RoleFilter::default());
        let ctx = ChatContext {
            insights: Some(&outcome.insights),
            skills: None,
        };
        let r = respond("is the market hot", ctx, &t);
        assert!(r.reply.contains("• python\n"));
    }

    #[test]
    fn test_learning_lists_first_course_per_role() {
        let r = ask("recommend a course", ChatContext::default());
        assert_eq!(r.intent, Intent::Learning);
        assert!(r.reply.contains("• CS50's Introduction to Computer Science (edX)"));
        assert!(r.reply.contains("• The Web Developer Bootcamp (Udemy)"));
        assert!(!r.reply.contains("Algorithms and Data Structures"));
    }

    #[test]
    fn test_fallback_echoes_message() {
        let r = ask("Hello There", ChatContext::default());
        assert_eq!(r.intent, Intent::Fallback);
        assert!(r.reply.contains("Your question: 'Hello There'"));
    }

    #[test]
    fn test_title_case_and_choices() {
        assert_eq!(title_case("machine learning"), "Machine Learning");
        assert_eq!(title_case("data-science"), "Data-Science");
        assert_eq!(title_case("ci/cd"), "Ci/Cd");
        assert_eq!(title_case("c++"), "C++");
        assert_eq!(join_choices(&["A"]), "A");
        assert_eq!(join_choices(&["A", "B", "C"]), "A, B, or C");
    }
}
