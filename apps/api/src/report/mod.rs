// Analysis report: preview as JSON, download as a paginated PDF.
// Layout is pure; rendering runs inside tokio::task::spawn_blocking.

pub mod handlers;
pub mod layout;
pub mod metrics;
pub mod renderer;

pub use renderer::{render_report, REPORT_FILENAME};
