//! Cancellation sources for the dashboard loop.
//!
//! OS termination requests and the in-dashboard Ctrl+C keypress both feed
//! the same broadcast sink; the loop never learns which one fired.
use std::time::Duration;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, poll, read};
use tokio::sync::broadcast;

use crate::shutdown::{ShutdownReceiver, ShutdownSender};

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

/// One slot is enough: the first cancellation event ends the run.
const SHUTDOWN_CHANNEL_CAPACITY: usize = 1;
/// Keyboard polling interval for Ctrl+C detection while the terminal is raw.
const KEYBOARD_POLL_INTERVAL: Duration = Duration::from_millis(100);

#[must_use]
pub fn shutdown_channel() -> (ShutdownSender, ShutdownReceiver) {
    broadcast::channel::<()>(SHUTDOWN_CHANNEL_CAPACITY)
}

/// Returns true for the interrupt key combination.
pub(crate) fn is_interrupt_key(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
        && key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Polls raw terminal input and turns Ctrl+C into a cancellation event.
///
/// Raw mode swallows the interrupt signal, so the keypress has to be read
/// here. The task never draws; it stops after sending or once any other
/// producer has cancelled.
#[must_use]
pub fn setup_keyboard_shutdown_handler(
    shutdown_tx: &ShutdownSender,
) -> tokio::task::JoinHandle<()> {
    let shutdown_tx = shutdown_tx.clone();
    let mut shutdown_rx = shutdown_tx.subscribe();

    tokio::task::spawn_blocking(move || {
        loop {
            match shutdown_rx.try_recv() {
                Ok(()) | Err(broadcast::error::TryRecvError::Closed) => break,
                Err(
                    broadcast::error::TryRecvError::Empty
                    | broadcast::error::TryRecvError::Lagged(_),
                ) => {}
            }

            let has_event = match poll(KEYBOARD_POLL_INTERVAL) {
                Ok(has_event) => has_event,
                Err(err) => {
                    tracing::debug!("Keyboard poll failed: {}", err);
                    std::thread::sleep(KEYBOARD_POLL_INTERVAL);
                    false
                }
            };

            if has_event
                && let Ok(Event::Key(key)) = read()
                && is_interrupt_key(&key)
            {
                tracing::debug!("Interrupt key pressed");
                drop(shutdown_tx.send(()));
                break;
            }
        }
    })
}

/// Forwards SIGINT/SIGTERM (Ctrl+C only on non-unix) into the sink.
#[must_use]
pub fn setup_signal_shutdown_handler(shutdown_tx: &ShutdownSender) -> tokio::task::JoinHandle<()> {
    let shutdown_tx = shutdown_tx.clone();
    tokio::spawn(async move {
        let mut shutdown_rx = shutdown_tx.subscribe();

        #[cfg(unix)]
        let mut term_signal = match signal(SignalKind::terminate()) {
            Ok(signal) => Some(signal),
            Err(err) => {
                tracing::warn!("Failed to register SIGTERM handler: {}", err);
                None
            }
        };

        #[cfg(unix)]
        {
            tokio::select! {
                _ = shutdown_rx.recv() => {}
                _ = tokio::signal::ctrl_c() => {
                    tracing::debug!("Interrupt signal received");
                    drop(shutdown_tx.send(()));
                }
                () = async {
                    if let Some(signal) = term_signal.as_mut() {
                        signal.recv().await;
                    } else {
                        std::future::pending::<()>().await;
                    }
                } => {
                    tracing::debug!("Terminate signal received");
                    drop(shutdown_tx.send(()));
                }
            }
        }

        #[cfg(not(unix))]
        {
            tokio::select! {
                _ = shutdown_rx.recv() => {}
                _ = tokio::signal::ctrl_c() => {
                    drop(shutdown_tx.send(()));
                }
            }
        }
    })
}
