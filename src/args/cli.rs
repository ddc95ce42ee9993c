use clap::Parser;
use std::time::Duration;

use super::parsers::{parse_bool_env, parse_duration_arg, parse_header, parse_positive_u64};
use super::types::{HttpMethod, PositiveU64};

/// Settings file consulted when `--settings` is not given.
pub const DEFAULT_SETTINGS_FILE: &str = "regiondash.toml";
/// Source used for envelopes when `--feed` is not given (stdin).
pub const STDIN_FEED: &str = "-";

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Live terminal dashboard for distributed, multi-region load-testing runs."
)]
pub struct MonitorArgs {
    /// URL to load test
    #[arg(long, short = 'u')]
    pub url: Option<String>,

    /// HTTP method
    #[arg(long, short = 'm', default_value = "get", ignore_case = true)]
    pub method: HttpMethod,

    /// HTTP request body
    #[arg(long, short = 'b', default_value = "")]
    pub body: String,

    /// Number of concurrent requests
    #[arg(long, short = 'c', default_value = "10", value_parser = parse_positive_u64)]
    pub concurrency: PositiveU64,

    /// Total number of requests to make
    #[arg(long, short = 'n', default_value = "1000", value_parser = parse_positive_u64)]
    pub requests: PositiveU64,

    /// Maximum seconds to spend on the run
    #[arg(long, short = 'N', default_value = "3600", value_parser = parse_positive_u64)]
    pub timelimit: PositiveU64,

    /// Request timeout in seconds
    #[arg(long, short = 't', default_value = "15", value_parser = parse_positive_u64)]
    pub timeout: PositiveU64,

    /// Regions to run in (repeatable, comma-separated lists accepted)
    #[arg(long = "region", short = 'r')]
    pub regions: Vec<String>,

    /// Optional path to a JSON file for result storage
    #[arg(long, short = 'o')]
    pub output: Option<String>,

    /// HTTP request header in 'Key: Value' format (repeatable)
    #[arg(long = "header", short = 'H', value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Load settings from file (defaults to regiondash.toml when present)
    #[arg(long, short = 's')]
    pub settings: Option<String>,

    /// Newline-delimited JSON envelope source ('-' reads stdin)
    #[arg(long, default_value = STDIN_FEED)]
    pub feed: String,

    /// Delay between replayed envelopes (supports ms/s/m/h)
    #[arg(long = "feed-interval", value_parser = parse_duration_arg)]
    pub feed_interval: Option<Duration>,

    /// Disable color output
    #[arg(
        long = "no-color",
        env = "NO_COLOR",
        value_parser = parse_bool_env,
        num_args = 0..=1,
        default_value = "false",
        default_missing_value = "true"
    )]
    pub no_color: bool,

    /// Enable verbose logging (sets log level to debug unless overridden by REGIONDASH_LOG/RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,
}
