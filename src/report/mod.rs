//! End-of-run console summary and JSON export.
mod export;
mod summary;


pub use export::{export_document, export_results, write_export};
pub use summary::{NO_RESULTS, print_summary, summary_lines};
