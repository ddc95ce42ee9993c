use super::run_event_loop;
use crate::config::RunConfig;
use crate::engine::TestEngine;
use crate::error::AppResult;
use crate::shutdown::{ShutdownReceiver, ShutdownSender};
use crate::shutdown_handlers::setup_keyboard_shutdown_handler;
use crate::snapshot::FinalResult;
use crate::ui::{Dashboard, ProgressEstimator, Surface, TerminalSurface};

/// Runs one dashboard session on `dashboard`.
///
/// Shows the banner, starts the engine, and drives the event loop.
/// `shutdown_rx` should be subscribed before any producer can fire, so a
/// cancellation that arrives while the engine starts is still seen. The
/// surface is closed and `engine.clean()` runs on every path, including a
/// failed start.
///
/// # Errors
///
/// Returns the engine's error when it fails to start.
pub async fn run_session<S, E>(
    dashboard: &mut Dashboard<S>,
    engine: &mut E,
    config: &RunConfig,
    shutdown_rx: &mut ShutdownReceiver,
) -> AppResult<FinalResult>
where
    S: Surface,
    E: TestEngine + ?Sized,
{
    dashboard.show_banner();

    let outcome = match engine.start().await {
        Ok(mut envelopes) => {
            dashboard.show_cancel_hint();
            let progress = ProgressEstimator::new(config.time_limit);
            Ok(run_event_loop(dashboard, &mut envelopes, shutdown_rx, &progress).await)
        }
        Err(err) => Err(err),
    };

    dashboard.close();
    engine.clean().await;
    outcome
}

/// Takes over the process terminal for the session and restores it after.
///
/// The keyboard handler feeds `shutdown_tx` while the terminal is in raw
/// mode; it is stopped by a final shutdown event once the session ends.
///
/// # Errors
///
/// Returns an error when the terminal cannot be initialised or the engine
/// fails to start.
pub async fn run_terminal_session<E>(
    engine: &mut E,
    config: &RunConfig,
    shutdown_tx: &ShutdownSender,
    shutdown_rx: &mut ShutdownReceiver,
) -> AppResult<FinalResult>
where
    E: TestEngine + ?Sized,
{
    let surface = TerminalSurface::open()?;
    let mut dashboard = Dashboard::new(surface, config.no_color);
    let keyboard = setup_keyboard_shutdown_handler(shutdown_tx);

    let outcome = run_session(&mut dashboard, engine, config, shutdown_rx).await;

    drop(shutdown_tx.send(()));
    drop(keyboard);
    drop(dashboard);
    outcome
}
