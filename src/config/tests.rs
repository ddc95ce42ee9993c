use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgMatches, CommandFactory, FromArgMatches};
use tempfile::tempdir;

use super::{DEFAULT_REGIONS, FeedSource, SettingsFile, build_run_config, load_settings_file};
use crate::args::{HttpMethod, MonitorArgs};
use crate::error::{AppError, ValidationError};

fn parse_cli(argv: &[&str]) -> Result<(MonitorArgs, ArgMatches), String> {
    let matches = MonitorArgs::command()
        .try_get_matches_from(argv)
        .map_err(|err| format!("parse failed: {}", err))?;
    let args =
        MonitorArgs::from_arg_matches(&matches).map_err(|err| format!("args failed: {}", err))?;
    Ok((args, matches))
}

#[test]
fn parse_toml_settings() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("regiondash.toml");
    let content = r#"
url = "http://localhost:3000"
method = "post"
concurrency = 50
requests = 2000
timelimit = 60
regions = ["us-east-1", "eu-central-1"]
headers = ["X-Run: nightly"]
output = "results.json"
feed_interval = "1s"
"#;
    std::fs::write(&path, content).map_err(|err| format!("write failed: {}", err))?;

    let settings = load_settings_file(&path).map_err(|err| err.to_string())?;
    if settings.url.as_deref() != Some("http://localhost:3000") {
        return Err("Unexpected url".to_owned());
    }
    if settings.method != Some(HttpMethod::Post) {
        return Err("Unexpected method".to_owned());
    }
    if settings.concurrency != Some(50) || settings.timelimit != Some(60) {
        return Err("Unexpected numbers".to_owned());
    }
    let regions = settings.regions.unwrap_or_default();
    if regions != ["us-east-1", "eu-central-1"] {
        return Err(format!("Unexpected regions: {:?}", regions));
    }
    Ok(())
}

#[test]
fn parse_json_settings() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("regiondash.json");
    std::fs::write(&path, r#"{"url": "http://localhost", "timeout": 5}"#)
        .map_err(|err| format!("write failed: {}", err))?;
    let settings = load_settings_file(&path).map_err(|err| err.to_string())?;
    if settings.timeout != Some(5) {
        return Err("Unexpected timeout".to_owned());
    }
    Ok(())
}

#[test]
fn malformed_settings_is_an_error() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "url = ").map_err(|err| format!("write failed: {}", err))?;
    match load_settings_file(&path) {
        Err(AppError::Config(_)) => Ok(()),
        Err(err) => Err(format!("Unexpected error kind: {}", err)),
        Ok(_) => Err("Expected parse failure".to_owned()),
    }
}

#[test]
fn unsupported_extension_is_rejected() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("settings.yaml");
    std::fs::write(&path, "url: x").map_err(|err| format!("write failed: {}", err))?;
    if load_settings_file(&path).is_ok() {
        return Err("Expected unsupported extension".to_owned());
    }
    Ok(())
}

#[test]
fn cli_overrides_settings_overrides_default() -> Result<(), String> {
    let (args, matches) = parse_cli(&["regiondash", "-c", "7", "-r", "sa-east-1"])?;
    let settings = SettingsFile {
        url: Some("http://from-settings".to_owned()),
        concurrency: Some(40),
        requests: Some(300),
        regions: Some(vec!["eu-west-1".to_owned()]),
        ..SettingsFile::default()
    };
    let config = build_run_config(args, &matches, Some(&settings)).map_err(|err| err.to_string())?;

    let checks = [
        (config.url == "http://from-settings", "url should come from settings"),
        (config.concurrency.get() == 7, "concurrency should come from cli"),
        (config.requests.get() == 300, "requests should come from settings"),
        (
            config.time_limit == Duration::from_secs(3600),
            "timelimit should use default",
        ),
        (config.regions == ["sa-east-1"], "regions should come from cli"),
        (config.method == HttpMethod::Get, "method should use default"),
        (config.feed == FeedSource::Stdin, "feed should default to stdin"),
    ];
    for (ok, message) in checks {
        if !ok {
            return Err(message.to_owned());
        }
    }
    Ok(())
}

#[test]
fn default_regions_when_unset() -> Result<(), String> {
    let (args, matches) = parse_cli(&["regiondash", "-u", "http://localhost"])?;
    let config = build_run_config(args, &matches, None).map_err(|err| err.to_string())?;
    if config.regions != DEFAULT_REGIONS {
        return Err(format!("Unexpected regions: {:?}", config.regions));
    }
    if config.output.is_some() {
        return Err("Expected no output".to_owned());
    }
    Ok(())
}

#[test]
fn settings_feed_and_output_are_applied() -> Result<(), String> {
    let (args, matches) = parse_cli(&["regiondash", "-u", "http://localhost"])?;
    let settings = SettingsFile {
        output: Some("summary.json".to_owned()),
        feed: Some("capture.ndjson".to_owned()),
        feed_interval: Some("200ms".to_owned()),
        regions: Some(vec!["us-east-1,us-west-2".to_owned()]),
        ..SettingsFile::default()
    };
    let config = build_run_config(args, &matches, Some(&settings)).map_err(|err| err.to_string())?;
    if config.output != Some(PathBuf::from("summary.json")) {
        return Err("Unexpected output".to_owned());
    }
    if config.feed != FeedSource::File(PathBuf::from("capture.ndjson")) {
        return Err("Unexpected feed".to_owned());
    }
    if config.feed_interval != Some(Duration::from_millis(200)) {
        return Err("Unexpected feed interval".to_owned());
    }
    if config.regions != ["us-east-1", "us-west-2"] {
        return Err(format!("Unexpected regions: {:?}", config.regions));
    }
    Ok(())
}

#[test]
fn zero_settings_value_is_rejected() -> Result<(), String> {
    let (args, matches) = parse_cli(&["regiondash", "-u", "http://localhost"])?;
    let settings = SettingsFile {
        timelimit: Some(0),
        ..SettingsFile::default()
    };
    if build_run_config(args, &matches, Some(&settings)).is_ok() {
        return Err("Expected zero timelimit to be rejected".to_owned());
    }
    Ok(())
}

#[test]
fn missing_url_is_rejected() -> Result<(), String> {
    let (args, matches) = parse_cli(&["regiondash"])?;
    match build_run_config(args, &matches, None) {
        Err(AppError::Validation(ValidationError::MissingUrl)) => Ok(()),
        Err(err) => Err(format!("Unexpected error: {}", err)),
        Ok(_) => Err("Expected missing url".to_owned()),
    }
}
