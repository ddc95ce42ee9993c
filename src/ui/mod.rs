//! Terminal dashboard: surface abstraction, region formatting, progress,
//! and the renderer that ties them together.
pub mod dashboard;
pub mod format;
pub mod progress;
pub mod surface;
mod theme;


pub use dashboard::Dashboard;
pub use format::{LATENCY_HEADING, RegionRows, THROUGHPUT_HEADING, format_bytes, format_region};
pub use progress::{PROGRESS_BAR_WIDTH, ProgressEstimator, filled_segments, percent_label, progress_bar};
pub use surface::{MemorySurface, Surface, TerminalSurface};
