//! Skill extraction: document bytes to text, text to vocabulary tokens.

use tracing::debug;

use crate::errors::AppError;

/// Extracts the text of every page of a PDF and lowercases it.
///
/// CPU-bound: callers run this inside `tokio::task::spawn_blocking`.
pub fn extract_document_text(bytes: &[u8]) -> Result<String, AppError> {
    if bytes.is_empty() {
        return Err(AppError::UnreadableDocument(
            "Uploaded document is empty".to_string(),
        ));
    }

    let text = pdf_extract::extract_text_from_mem(bytes).map_err(|e| {
        AppError::UnreadableDocument(format!("Failed to extract text from PDF: {e}"))
    })?;
    debug!("Extracted {} characters of document text", text.len());

    Ok(text.to_lowercase())
}

/// Returns every vocabulary token that occurs as a substring of `text`.
///
/// Order follows the vocabulary, not the document. There is no word-boundary
/// check, so "c" matches inside "scala".
pub fn extract_skills(text: &str, vocabulary: &[String]) -> Vec<String> {
    let text = text.to_lowercase();
    vocabulary
        .iter()
        .filter(|skill| text.contains(skill.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::taxonomy::reference_taxonomy;

    fn vocab(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_reference_scenario() {
        let t = reference_taxonomy();
        let found = extract_skills("python sql machine learning", &t.vocabulary);
        // "c" occurs inside "machine"
        assert_eq!(found, vec!["python", "c", "sql", "machine learning"]);
    }

    #[test]
    fn test_order_follows_vocabulary() {
        let v = vocab(&["sql", "python"]);
        assert_eq!(extract_skills("python then sql", &v), vec!["sql", "python"]);
    }

    #[test]
    fn test_partial_word_matches_count() {
        let v = vocab(&["c", "java"]);
        assert_eq!(extract_skills("scala and javascript", &v), vec!["c", "java"]);
    }

    #[test]
    fn test_empty_text_yields_nothing() {
        let t = reference_taxonomy();
        assert!(extract_skills("", &t.vocabulary).is_empty());
    }

    #[test]
    fn test_uppercase_text_still_matches() {
        let v = vocab(&["django"]);
        assert_eq!(extract_skills("Built APIs with DJANGO", &v), vec!["django"]);
    }

    #[test]
    fn test_output_is_subset_and_complete() {
        let t = reference_taxonomy();
        let text = "experienced in c++, html/css, flask and data science pipelines";
        let found = extract_skills(text, &t.vocabulary);
        for skill in &found {
            assert!(t.vocabulary.contains(skill));
        }
        for skill in &t.vocabulary {
            if text.contains(skill.as_str()) {
                assert!(found.contains(skill), "{skill} should have been found");
            }
        }
    }

    #[test]
    fn test_empty_document_is_unreadable() {
        assert!(matches!(
            extract_document_text(&[]),
            Err(AppError::UnreadableDocument(_))
        ));
    }

    #[test]
    fn test_garbage_document_is_unreadable() {
        assert!(matches!(
            extract_document_text(b"this is not a pdf"),
            Err(AppError::UnreadableDocument(_))
        ));
    }
}
