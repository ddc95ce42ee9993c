use std::path::PathBuf;
use std::time::Duration;

use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{MonitorArgs, PositiveU64, parse_duration_arg, parse_header, split_regions};
use crate::error::{AppError, AppResult, ConfigError, ValidationError};

use super::types::{FeedSource, RunConfig, SettingsFile};

/// Regions used when neither the command line nor the settings file names any.
pub const DEFAULT_REGIONS: [&str; 3] = ["us-east-1", "eu-west-1", "ap-northeast-1"];

fn is_cli(matches: &ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(ValueSource::CommandLine)
}

fn ensure_positive_u64(value: u64, field: &str) -> AppResult<PositiveU64> {
    PositiveU64::try_from(value).map_err(|err| {
        AppError::config(ConfigError::FieldMustBePositive {
            field: field.to_owned(),
            source: err,
        })
    })
}

fn parse_headers(headers: &[String]) -> AppResult<Vec<(String, String)>> {
    let mut parsed = Vec::with_capacity(headers.len());
    for header in headers {
        parsed.push(
            parse_header(header)
                .map_err(|err| AppError::config(ConfigError::InvalidHeader { source: err }))?,
        );
    }
    Ok(parsed)
}

/// Resolves the run configuration. For every field the command line wins
/// over the settings file, which wins over the built-in default.
///
/// # Errors
///
/// Returns an error when a settings value is invalid or no URL is set by
/// either source.
pub fn build_run_config(
    mut args: MonitorArgs,
    matches: &ArgMatches,
    settings: Option<&SettingsFile>,
) -> AppResult<RunConfig> {
    if let Some(settings) = settings {
        apply_settings(&mut args, matches, settings)?;
    }

    let Some(url) = args.url.take() else {
        tracing::error!("Missing URL (set --url or provide in settings).");
        return Err(AppError::validation(ValidationError::MissingUrl));
    };
    let regions = resolve_regions(&args.regions, matches, settings)?;
    let output = args
        .output
        .take()
        .filter(|path| !path.is_empty())
        .map(PathBuf::from);

    Ok(RunConfig {
        url,
        method: args.method,
        body: args.body,
        headers: args.headers,
        concurrency: args.concurrency,
        requests: args.requests,
        time_limit: Duration::from_secs(args.timelimit.get()),
        request_timeout: Duration::from_secs(args.timeout.get()),
        regions,
        output,
        feed: FeedSource::from_arg(&args.feed),
        feed_interval: args.feed_interval,
        no_color: args.no_color,
    })
}

fn apply_settings(
    args: &mut MonitorArgs,
    matches: &ArgMatches,
    settings: &SettingsFile,
) -> AppResult<()> {
    if !is_cli(matches, "url")
        && let Some(url) = settings.url.clone()
    {
        args.url = Some(url);
    }

    if !is_cli(matches, "method")
        && let Some(method) = settings.method
    {
        args.method = method;
    }

    if !is_cli(matches, "body")
        && let Some(body) = settings.body.clone()
    {
        args.body = body;
    }

    if !is_cli(matches, "headers")
        && let Some(headers) = settings.headers.as_deref()
    {
        args.headers = parse_headers(headers)?;
    }

    if !is_cli(matches, "concurrency")
        && let Some(value) = settings.concurrency
    {
        args.concurrency = ensure_positive_u64(value, "concurrency")?;
    }

    if !is_cli(matches, "requests")
        && let Some(value) = settings.requests
    {
        args.requests = ensure_positive_u64(value, "requests")?;
    }

    if !is_cli(matches, "timelimit")
        && let Some(value) = settings.timelimit
    {
        args.timelimit = ensure_positive_u64(value, "timelimit")?;
    }

    if !is_cli(matches, "timeout")
        && let Some(value) = settings.timeout
    {
        args.timeout = ensure_positive_u64(value, "timeout")?;
    }

    if !is_cli(matches, "output")
        && let Some(output) = settings.output.clone()
    {
        args.output = Some(output);
    }

    if !is_cli(matches, "feed")
        && let Some(feed) = settings.feed.clone()
    {
        args.feed = feed;
    }

    if !is_cli(matches, "feed_interval")
        && let Some(value) = settings.feed_interval.as_deref()
    {
        let interval = parse_duration_arg(value).map_err(|err| {
            AppError::config(ConfigError::InvalidFeedInterval { source: err })
        })?;
        args.feed_interval = Some(interval);
    }

    if !is_cli(matches, "no_color")
        && let Some(no_color) = settings.no_color
    {
        args.no_color = no_color;
    }

    Ok(())
}

fn resolve_regions(
    cli_regions: &[String],
    matches: &ArgMatches,
    settings: Option<&SettingsFile>,
) -> AppResult<Vec<String>> {
    if is_cli(matches, "regions") && !cli_regions.is_empty() {
        return Ok(split_regions(cli_regions)?);
    }
    if let Some(regions) = settings.and_then(|settings| settings.regions.as_deref())
        && !regions.is_empty()
    {
        return split_regions(regions).map_err(|err| {
            AppError::config(ConfigError::InvalidRegions { source: err })
        });
    }
    Ok(DEFAULT_REGIONS.iter().map(|region| (*region).to_owned()).collect())
}
