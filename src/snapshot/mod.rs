//! Snapshot model for per-region aggregate statistics.
//!
//! Each [`AggregateEnvelope`] received from the engine is a complete picture
//! of the run at one point in time; it replaces whatever the monitor held
//! before. [`FinalResult`] is derived once from the last envelope when the
//! dashboard loop stops.
mod envelope;
mod final_result;
mod nanos;
mod region;

#[cfg(test)]
mod tests;

pub use envelope::AggregateEnvelope;
pub use final_result::{FinalResult, OVERALL_KEY, sum_regions};
pub use region::{RegionSnapshot, StatusCounts};
