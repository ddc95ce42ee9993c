//! CLI argument types and parsing helpers.
mod cli;
pub(crate) mod parsers;
mod types;

#[cfg(test)]
mod tests;

pub use cli::{DEFAULT_SETTINGS_FILE, MonitorArgs, STDIN_FEED};
pub use types::{HttpMethod, PositiveU64};

pub(crate) use parsers::{parse_duration_arg, parse_header, split_regions};
