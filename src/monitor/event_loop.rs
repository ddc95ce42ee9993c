use tokio::sync::{broadcast, mpsc};
use tokio::time::Instant;

use crate::shutdown::ShutdownReceiver;
use crate::snapshot::{AggregateEnvelope, FinalResult};
use crate::ui::{Dashboard, ProgressEstimator, Surface};

/// Renders every envelope until the stream closes or cancellation arrives.
///
/// Each envelope fully replaces the previous one. Cancellation is checked
/// first on every turn, so a pending envelope may be dropped when both are
/// ready. The last rendered envelope becomes the [`FinalResult`].
pub async fn run_event_loop<S: Surface>(
    dashboard: &mut Dashboard<S>,
    envelopes: &mut mpsc::Receiver<AggregateEnvelope>,
    shutdown_rx: &mut ShutdownReceiver,
    progress: &ProgressEstimator,
) -> FinalResult {
    let started = Instant::now();
    let mut last: Option<AggregateEnvelope> = None;
    let mut shutdown_open = true;
    let mut rendered: u64 = 0;

    loop {
        tokio::select! {
            biased;
            signal = shutdown_rx.recv(), if shutdown_open => {
                match signal {
                    Ok(()) | Err(broadcast::error::RecvError::Lagged(_)) => {
                        tracing::debug!("Cancellation received after {} envelopes", rendered);
                        break;
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        shutdown_open = false;
                    }
                }
            }
            next = envelopes.recv() => {
                let Some(envelope) = next else {
                    tracing::debug!("Result stream closed after {} envelopes", rendered);
                    break;
                };
                let fraction = progress.fraction(
                    envelope.total_completed(),
                    envelope.total_expected_requests,
                    started.elapsed(),
                );
                let order = envelope.sorted_region_ids();
                dashboard.render_envelope(&envelope, &order, fraction);
                rendered = rendered.saturating_add(1);
                last = Some(envelope);
            }
        }
    }

    FinalResult::new(last)
}
