//! Report layout: turns an insight bundle into positioned lines on pages.
//!
//! Two stages, both pure:
//! - `compose_report` builds the flow of blocks (headings, bullets, spacers, breaks).
//! - `paginate` wraps every block at the text width and assigns it a page and
//!   a baseline, starting a new page whenever the next line would cross the
//!   bottom margin.
//!
//! Coordinates are millimetres from the bottom-left corner, as printpdf expects.

use crate::analysis::insights::InsightBundle;
use crate::report::metrics::{get_metrics, sanitize, ReportFont};

const POINTS_PER_MM: f32 = 72.0 / 25.4;
const LINE_SPACING: f32 = 1.25;
const SECTION_GAP_MM: f32 = 5.0;
const PATH_GAP_MM: f32 = 2.5;

// ────────────────────────────────────────────────────────────────────────────
// Page geometry
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width_mm: f32,
    pub height_mm: f32,
    pub margin_x_mm: f32,
    pub margin_y_mm: f32,
}

impl PageGeometry {
    /// US letter with half-inch top and bottom margins and one-inch sides.
    pub fn us_letter() -> Self {
        Self {
            width_mm: 215.9,
            height_mm: 279.4,
            margin_x_mm: 25.4,
            margin_y_mm: 12.7,
        }
    }

    pub fn text_width_mm(&self) -> f32 {
        self.width_mm - 2.0 * self.margin_x_mm
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Blocks
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TextStyle {
    Title,
    Heading,
    Subheading,
    Body,
}

impl TextStyle {
    pub fn font(self) -> ReportFont {
        match self {
            TextStyle::Body => ReportFont::Helvetica,
            _ => ReportFont::HelveticaBold,
        }
    }

    pub fn size_pt(self) -> f32 {
        match self {
            TextStyle::Title => 24.0,
            TextStyle::Heading => 14.0,
            TextStyle::Subheading => 12.0,
            TextStyle::Body => 10.0,
        }
    }

    fn line_height_mm(self) -> f32 {
        self.size_pt() * LINE_SPACING / POINTS_PER_MM
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Text { text: String, style: TextStyle },
    Spacer(f32),
    PageBreak,
}

fn text(style: TextStyle, s: impl Into<String>) -> Block {
    Block::Text {
        text: s.into(),
        style,
    }
}

fn bullet(s: impl AsRef<str>) -> Block {
    text(TextStyle::Body, format!("- {}", s.as_ref()))
}

/// Builds the report flow: summary sections on the first page(s), then a
/// page break and one learning path per top-ranked role.
pub fn compose_report(insights: &InsightBundle) -> Vec<Block> {
    let mut blocks = vec![
        text(TextStyle::Title, "Resume Analysis Report"),
        Block::Spacer(SECTION_GAP_MM),
        text(
            TextStyle::Heading,
            format!("Your Resume Score: {}%", insights.resume_score),
        ),
        text(TextStyle::Body, insights.feedback.as_str()),
        Block::Spacer(SECTION_GAP_MM),
        text(TextStyle::Subheading, "Your Strengths:"),
    ];

    blocks.extend(insights.strengths.iter().take(5).map(bullet));
    blocks.push(Block::Spacer(SECTION_GAP_MM));

    blocks.push(text(TextStyle::Subheading, "Common Skill Gaps:"));
    blocks.extend(
        insights
            .weaknesses
            .iter()
            .take(5)
            .map(|w| bullet(format!("{} (needed in {} role(s))", w.skill, w.roles))),
    );
    blocks.push(Block::Spacer(SECTION_GAP_MM));

    blocks.push(text(TextStyle::Subheading, "High-Demand Skills to Learn:"));
    blocks.extend(
        insights
            .trending_skills
            .iter()
            .take(5)
            .map(|t| bullet(format!("{} (in {} role(s))", t.skill, t.roles))),
    );
    blocks.push(Block::Spacer(SECTION_GAP_MM));

    blocks.push(text(TextStyle::Subheading, "Role Comparison:"));
    blocks.extend(insights.role_comparison.iter().map(|c| {
        bullet(format!(
            "{}: {}% match | {} gaps",
            c.role, c.score, c.gap_count
        ))
    }));
    blocks.push(Block::Spacer(SECTION_GAP_MM));

    blocks.push(Block::PageBreak);
    blocks.push(text(TextStyle::Subheading, "Personalized Learning Paths:"));
    for path in &insights.learning_paths {
        blocks.push(text(
            TextStyle::Subheading,
            format!("Path to become a {}:", path.role),
        ));
        blocks.extend(path.steps.iter().map(bullet));
        if !path.courses.is_empty() {
            blocks.push(text(TextStyle::Body, "Recommended Courses:"));
            blocks.extend(path.courses.iter().map(|c| bullet(&c.title)));
        }
        blocks.push(Block::Spacer(PATH_GAP_MM));
    }

    blocks
}

// ────────────────────────────────────────────────────────────────────────────
// Pagination
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub style: TextStyle,
    pub x_mm: f32,
    /// Baseline, measured from the bottom of the page.
    pub y_mm: f32,
}

pub type Page = Vec<PlacedLine>;

/// Wraps and positions every block. Always returns at least one page.
pub fn paginate(blocks: &[Block], geometry: &PageGeometry) -> Vec<Page> {
    let top = geometry.height_mm - geometry.margin_y_mm;
    let bottom = geometry.margin_y_mm;

    let mut pages: Vec<Page> = vec![Vec::new()];
    let mut cursor = top;

    for block in blocks {
        match block {
            Block::Spacer(mm) => {
                // Spacers never start a page on their own.
                cursor = (cursor - mm).max(bottom);
            }
            Block::PageBreak => {
                if pages.last().map_or(false, |p| !p.is_empty()) {
                    pages.push(Vec::new());
                }
                cursor = top;
            }
            Block::Text { text, style } => {
                let size = style.size_pt();
                let width_em = geometry.text_width_mm() * POINTS_PER_MM / size;
                let metrics = get_metrics(style.font());
                let line_height = style.line_height_mm();

                for line in metrics.wrap(&sanitize(text), width_em) {
                    if cursor - line_height < bottom {
                        pages.push(Vec::new());
                        cursor = top;
                    }
                    cursor -= line_height;
                    let x_mm = if *style == TextStyle::Title {
                        let line_w = metrics.measure_str(&line) * size / POINTS_PER_MM;
                        geometry.margin_x_mm + (geometry.text_width_mm() - line_w).max(0.0) / 2.0
                    } else {
                        geometry.margin_x_mm
                    };
                    if let Some(page) = pages.last_mut() {
                        page.push(PlacedLine {
                            text: line,
                            style: *style,
                            x_mm,
                            y_mm: cursor,
                        });
                    }
                }
            }
        }
    }

    pages
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
