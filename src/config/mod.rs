//! Settings-file loading and the explicit merge into [`RunConfig`].
mod apply;
mod loader;
pub mod types;

#[cfg(test)]
mod tests;

pub use apply::{DEFAULT_REGIONS, build_run_config};
pub use loader::{load_settings, load_settings_file};
pub use types::{FeedSource, RunConfig, SettingsFile};
