// Resume analysis: text extraction, role scoring, insight derivation, storage.
// Everything below `pipeline` is pure; `records` and `handlers` touch I/O.
// PDF text extraction is CPU-bound and runs inside tokio::task::spawn_blocking.

pub mod extractor;
pub mod handlers;
pub mod insights;
pub mod pipeline;
pub mod records;
pub mod scorer;
pub mod taxonomy;

pub use pipeline::{analyze_text, AnalysisOutcome, ChartData};
pub use taxonomy::Taxonomy;
