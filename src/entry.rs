use std::ffi::OsString;
use std::time::Duration;

use clap::{ArgMatches, CommandFactory, FromArgMatches};

use crate::args::MonitorArgs;
use crate::config::{build_run_config, load_settings};
use crate::engine::FeedEngine;
use crate::error::AppResult;
use crate::monitor::run_terminal_session;
use crate::report::{export_results, print_summary};
use crate::shutdown_handlers::{setup_signal_shutdown_handler, shutdown_channel};

/// Upper bound on waiting for blocking readers (stdin, key polling) at exit.
const RUNTIME_SHUTDOWN_TIMEOUT: Duration = Duration::from_millis(500);

/// Runs the monitor with the process arguments.
///
/// # Errors
///
/// Returns an error when configuration is invalid, the terminal cannot be
/// initialised, or the engine fails to start.
pub fn run() -> AppResult<()> {
    run_from(std::env::args_os())
}

/// Runs the monitor with an explicit argument list (first item is the
/// program name).
///
/// # Errors
///
/// See [`run`].
pub fn run_from<I, T>(raw_args: I) -> AppResult<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let (args, matches) = parse_args(raw_args)?;

    crate::logger::init_logging(args.verbose, args.no_color);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let outcome = runtime.block_on(run_async(args, &matches));
    runtime.shutdown_timeout(RUNTIME_SHUTDOWN_TIMEOUT);
    outcome
}

fn parse_args<I, T>(raw_args: I) -> AppResult<(MonitorArgs, ArgMatches)>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = MonitorArgs::command().get_matches_from(raw_args);
    let args = MonitorArgs::from_arg_matches(&matches)?;
    Ok((args, matches))
}

async fn run_async(args: MonitorArgs, matches: &ArgMatches) -> AppResult<()> {
    let settings = load_settings(args.settings.as_deref())?;
    let config = build_run_config(args, matches, settings.as_ref())?;
    for line in config.selection_lines() {
        tracing::info!("{}", line);
    }

    let (shutdown_tx, mut shutdown_rx) = shutdown_channel();
    let signal_handle = setup_signal_shutdown_handler(&shutdown_tx);

    let mut engine = FeedEngine::from_config(&config);
    let session = run_terminal_session(&mut engine, &config, &shutdown_tx, &mut shutdown_rx).await;
    if !signal_handle.is_finished() {
        signal_handle.abort();
    }
    let result = session?;

    print_summary(&result, config.no_color);
    if let Some(path) = &config.output {
        export_results(path, &result).await;
    }
    Ok(())
}
