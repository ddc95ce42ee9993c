use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::args::{HttpMethod, PositiveU64};

/// Settings as read from disk; every field is optional and only fills in
/// values the command line did not set.
#[derive(Debug, Default, Deserialize)]
pub struct SettingsFile {
    pub url: Option<String>,
    pub method: Option<HttpMethod>,
    pub body: Option<String>,
    pub concurrency: Option<u64>,
    pub requests: Option<u64>,
    pub timelimit: Option<u64>,
    pub timeout: Option<u64>,
    pub regions: Option<Vec<String>>,
    pub output: Option<String>,
    pub headers: Option<Vec<String>>,
    pub feed: Option<String>,
    pub feed_interval: Option<String>,
    pub no_color: Option<bool>,
}

/// Where the bundled engine reads envelopes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSource {
    Stdin,
    File(PathBuf),
}

impl FeedSource {
    #[must_use]
    pub fn from_arg(value: &str) -> Self {
        if value == crate::args::STDIN_FEED {
            Self::Stdin
        } else {
            Self::File(PathBuf::from(value))
        }
    }
}

/// Immutable run configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub url: String,
    pub method: HttpMethod,
    pub body: String,
    pub headers: Vec<(String, String)>,
    pub concurrency: PositiveU64,
    pub requests: PositiveU64,
    pub time_limit: Duration,
    pub request_timeout: Duration,
    pub regions: Vec<String>,
    pub output: Option<PathBuf>,
    pub feed: FeedSource,
    pub feed_interval: Option<Duration>,
    pub no_color: bool,
}

impl RunConfig {
    /// Human readable listing of the resolved settings, one per line.
    #[must_use]
    pub fn selection_lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(12);
        lines.push(format!("url: {}", self.url));
        lines.push(format!("method: {}", self.method.as_str()));
        lines.push(format!("body_bytes: {}", self.body.len()));
        lines.push(format!("headers: {}", self.headers.len()));
        lines.push(format!("concurrency: {}", self.concurrency.get()));
        lines.push(format!("requests: {}", self.requests.get()));
        lines.push(format!("timelimit_s: {}", self.time_limit.as_secs()));
        lines.push(format!("timeout_s: {}", self.request_timeout.as_secs()));
        lines.push(format!("regions: {}", self.regions.join(",")));
        lines.push(format!(
            "output: {}",
            self.output
                .as_ref()
                .map_or_else(|| "none".to_owned(), |path| path.display().to_string())
        ));
        lines.push(format!(
            "feed: {}",
            match &self.feed {
                FeedSource::Stdin => "stdin".to_owned(),
                FeedSource::File(path) => path.display().to_string(),
            }
        ));
        lines.push(format!(
            "feed_interval_ms: {}",
            self.feed_interval
                .map_or_else(|| "none".to_owned(), |value| value.as_millis().to_string())
        ));
        lines
    }
}
