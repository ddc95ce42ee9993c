use super::*;
use crate::args::parsers::parse_bool_env;
use crate::error::{AppError, AppResult};
use clap::Parser;
use std::time::Duration;

fn parse_test_args<I, T>(args: I) -> AppResult<MonitorArgs>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    MonitorArgs::try_parse_from(args).map_err(AppError::from)
}

#[test]
fn parse_args_defaults() -> AppResult<()> {
    let args = parse_test_args(["regiondash"])?;

    let expected_no_color = std::env::var("NO_COLOR")
        .ok()
        .and_then(|value| parse_bool_env(&value).ok())
        .unwrap_or(false);

    let checks = [
        (args.url.is_none(), "Expected url to be None"),
        (
            matches!(args.method, HttpMethod::Get),
            "Expected HttpMethod::Get",
        ),
        (args.body.is_empty(), "Expected empty body"),
        (args.concurrency.get() == 10, "Unexpected concurrency"),
        (args.requests.get() == 1000, "Unexpected requests"),
        (args.timelimit.get() == 3600, "Unexpected timelimit"),
        (args.timeout.get() == 15, "Unexpected timeout"),
        (args.regions.is_empty(), "Expected no regions"),
        (args.output.is_none(), "Expected output to be None"),
        (args.headers.is_empty(), "Expected no headers"),
        (args.settings.is_none(), "Expected settings to be None"),
        (args.feed == STDIN_FEED, "Expected stdin feed"),
        (args.feed_interval.is_none(), "Expected no feed interval"),
        (args.no_color == expected_no_color, "Unexpected no_color"),
        (!args.verbose, "Expected verbose to be false"),
    ];
    for (ok, message) in checks {
        if !ok {
            return Err(AppError::validation(message));
        }
    }
    Ok(())
}

#[test]
fn parse_args_short_flags() -> AppResult<()> {
    let args = parse_test_args([
        "regiondash",
        "-u",
        "http://localhost:8080",
        "-m",
        "POST",
        "-b",
        "{}",
        "-c",
        "25",
        "-n",
        "5000",
        "-N",
        "120",
        "-t",
        "3",
        "-r",
        "us-east-1,eu-west-1",
        "-r",
        "ap-southeast-2",
        "-o",
        "out.json",
        "-H",
        "X-Trace: abc",
        "-s",
        "custom.toml",
    ])?;

    if args.url.as_deref() != Some("http://localhost:8080") {
        return Err(AppError::validation("Unexpected url"));
    }
    if args.method != HttpMethod::Post {
        return Err(AppError::validation("Expected HttpMethod::Post"));
    }
    if args.concurrency.get() != 25 || args.requests.get() != 5000 {
        return Err(AppError::validation("Unexpected load shape"));
    }
    if args.timelimit.get() != 120 || args.timeout.get() != 3 {
        return Err(AppError::validation("Unexpected limits"));
    }
    if args.regions != ["us-east-1,eu-west-1", "ap-southeast-2"] {
        return Err(AppError::validation(format!(
            "Unexpected regions: {:?}",
            args.regions
        )));
    }
    if args.headers != [("X-Trace".to_owned(), "abc".to_owned())] {
        return Err(AppError::validation("Unexpected headers"));
    }
    if args.output.as_deref() != Some("out.json") || args.settings.as_deref() != Some("custom.toml")
    {
        return Err(AppError::validation("Unexpected paths"));
    }
    Ok(())
}

#[test]
fn parse_args_rejects_zero_timelimit() -> AppResult<()> {
    if parse_test_args(["regiondash", "-N", "0"]).is_ok() {
        return Err(AppError::validation("Expected zero timelimit to be rejected"));
    }
    Ok(())
}

#[test]
fn parse_args_feed_interval_units() -> AppResult<()> {
    let args = parse_test_args(["regiondash", "--feed", "run.ndjson", "--feed-interval", "250ms"])?;
    if args.feed != "run.ndjson" {
        return Err(AppError::validation("Unexpected feed"));
    }
    if args.feed_interval != Some(Duration::from_millis(250)) {
        return Err(AppError::validation("Unexpected feed interval"));
    }
    Ok(())
}

#[test]
fn split_regions_flattens_comma_lists() -> AppResult<()> {
    let regions = split_regions(&["us-east-1, eu-west-1", "ap-northeast-1"])?;
    if regions != ["us-east-1", "eu-west-1", "ap-northeast-1"] {
        return Err(AppError::validation(format!(
            "Unexpected regions: {:?}",
            regions
        )));
    }
    if split_regions(&["us-east-1,,eu-west-1"]).is_ok() {
        return Err(AppError::validation("Expected empty entry to be rejected"));
    }
    Ok(())
}

#[test]
fn parse_header_trims_parts() -> AppResult<()> {
    let header = parse_header("  Authorization :  Bearer token ")?;
    if header != ("Authorization".to_owned(), "Bearer token".to_owned()) {
        return Err(AppError::validation("Unexpected header"));
    }
    if parse_header("missing-colon").is_ok() {
        return Err(AppError::validation("Expected invalid header"));
    }
    Ok(())
}

#[test]
fn parse_duration_arg_units() -> AppResult<()> {
    let cases = [
        ("15", Duration::from_secs(15)),
        ("500ms", Duration::from_millis(500)),
        ("2m", Duration::from_secs(120)),
        ("1h", Duration::from_secs(3600)),
    ];
    for (input, expected) in cases {
        let parsed = parse_duration_arg(input)?;
        if parsed != expected {
            return Err(AppError::validation(format!(
                "Unexpected duration for {}: {:?}",
                input, parsed
            )));
        }
    }
    for invalid in ["", "ms", "0s", "5d"] {
        if parse_duration_arg(invalid).is_ok() {
            return Err(AppError::validation(format!(
                "Expected '{}' to be rejected",
                invalid
            )));
        }
    }
    Ok(())
}
