//! PDF rendering for the downloadable analysis report.
//!
//! `render_report_sync` is CPU-bound and holds a non-`Send` document, so it
//! runs entirely inside `tokio::task::spawn_blocking` via `render_report`.

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument};
use tracing::info;

use crate::analysis::insights::InsightBundle;
use crate::errors::AppError;
use crate::report::layout::{compose_report, paginate, PageGeometry};
use crate::report::metrics::ReportFont;

pub const REPORT_FILENAME: &str = "resume_analysis_report.pdf";

const DOCUMENT_TITLE: &str = "Resume Analysis Report";

/// Renders the report for `insights` and returns the PDF bytes.
pub async fn render_report(insights: InsightBundle) -> Result<Vec<u8>, AppError> {
    let bytes = tokio::task::spawn_blocking(move || render_report_sync(&insights))
        .await
        .map_err(|e| {
            AppError::Internal(anyhow::anyhow!("spawn_blocking failed in report rendering: {e}"))
        })??;
    info!("Rendered analysis report ({} bytes)", bytes.len());
    Ok(bytes)
}

pub fn render_report_sync(insights: &InsightBundle) -> Result<Vec<u8>, AppError> {
    let geometry = PageGeometry::us_letter();
    let pages = paginate(&compose_report(insights), &geometry);

    let (doc, first_page, first_layer) = PdfDocument::new(
        DOCUMENT_TITLE,
        Mm(geometry.width_mm),
        Mm(geometry.height_mm),
        "Layer 1",
    );

    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| AppError::Report(format!("Failed to load Helvetica: {e}")))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| AppError::Report(format!("Failed to load Helvetica-Bold: {e}")))?;

    for (i, page) in pages.iter().enumerate() {
        let (page_idx, layer_idx) = if i == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(
                Mm(geometry.width_mm),
                Mm(geometry.height_mm),
                format!("Page {}", i + 1),
            )
        };
        let layer = doc.get_page(page_idx).get_layer(layer_idx);
        for line in page {
            let font: &IndirectFontRef = match line.style.font() {
                ReportFont::Helvetica => &regular,
                ReportFont::HelveticaBold => &bold,
            };
            layer.use_text(
                line.text.as_str(),
                line.style.size_pt(),
                Mm(line.x_mm),
                Mm(line.y_mm),
                font,
            );
        }
    }

    doc.save_to_bytes()
        .map_err(|e| AppError::Report(format!("Failed to serialize PDF: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::pipeline::analyze_text;
    use crate::analysis::scorer::RoleFilter;
    use crate::analysis::taxonomy::reference_taxonomy;

    #[test]
    fn test_render_produces_pdf() {
        let insights = analyze_text(
            "python sql machine learning",
            &reference_taxonomy(),
            &RoleFilter::default(),
        )
        .insights;
        let bytes = render_report_sync(&insights).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_render_empty_analysis() {
        let insights = analyze_text("", &reference_taxonomy(), &RoleFilter::default()).insights;
        let bytes = render_report(insights).await.unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
