use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::TestEngine;
use crate::config::{FeedSource, RunConfig};
use crate::error::AppResult;
use crate::snapshot::AggregateEnvelope;

/// Envelopes buffered between the reader task and the dashboard loop.
pub const FEED_CHANNEL_CAPACITY: usize = 16;

/// Replays newline-delimited JSON envelopes from a file or stdin.
#[derive(Debug)]
pub struct FeedEngine {
    source: FeedSource,
    interval: Option<Duration>,
    reader: Option<JoinHandle<()>>,
}

impl FeedEngine {
    #[must_use]
    pub const fn new(source: FeedSource, interval: Option<Duration>) -> Self {
        Self {
            source,
            interval,
            reader: None,
        }
    }

    #[must_use]
    pub fn from_config(config: &RunConfig) -> Self {
        Self::new(config.feed.clone(), config.feed_interval)
    }
}

#[async_trait]
impl TestEngine for FeedEngine {
    async fn start(&mut self) -> AppResult<mpsc::Receiver<AggregateEnvelope>> {
        let (sender, receiver) = mpsc::channel(FEED_CHANNEL_CAPACITY);
        let handle = match &self.source {
            FeedSource::Stdin => {
                tracing::debug!("Reading envelopes from stdin");
                spawn_feed_reader(BufReader::new(tokio::io::stdin()), sender, self.interval)
            }
            FeedSource::File(path) => {
                tracing::debug!("Reading envelopes from {}", path.display());
                let file = tokio::fs::File::open(path).await?;
                spawn_feed_reader(BufReader::new(file), sender, self.interval)
            }
        };
        self.reader = Some(handle);
        Ok(receiver)
    }

    async fn clean(&mut self) {
        let Some(handle) = self.reader.take() else {
            return;
        };
        if !handle.is_finished() {
            tracing::debug!("Stopping feed reader");
            handle.abort();
        }
        if let Err(err) = handle.await
            && !err.is_cancelled()
        {
            tracing::warn!("Feed reader failed: {}", err);
        }
    }
}

/// Decodes one feed line. Blank lines yield `Ok(None)`.
///
/// # Errors
///
/// Returns the JSON error when the line is not a valid envelope.
pub fn decode_line(line: &str) -> Result<Option<AggregateEnvelope>, serde_json::Error> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    serde_json::from_str(trimmed).map(Some)
}

/// Spawns a task forwarding every decodable line of `reader` to `sender`.
///
/// Malformed lines are logged and skipped. The channel closes when the
/// reader hits EOF or fails, or when the receiving side goes away.
#[must_use]
pub fn spawn_feed_reader<R>(
    reader: R,
    sender: mpsc::Sender<AggregateEnvelope>,
    interval: Option<Duration>,
) -> JoinHandle<()>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut lines = reader.lines();
        let mut line_no: u64 = 0;
        let mut delivered: u64 = 0;
        loop {
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(err) => {
                    tracing::warn!("Failed to read feed: {}", err);
                    break;
                }
            };
            line_no = line_no.saturating_add(1);

            let envelope = match decode_line(&line) {
                Ok(Some(envelope)) => envelope,
                Ok(None) => continue,
                Err(err) => {
                    tracing::warn!("Skipping malformed envelope on line {}: {}", line_no, err);
                    continue;
                }
            };

            if delivered > 0
                && let Some(pause) = interval
            {
                tokio::time::sleep(pause).await;
            }
            if sender.send(envelope).await.is_err() {
                tracing::debug!("Envelope receiver dropped; stopping feed");
                break;
            }
            delivered = delivered.saturating_add(1);
        }
        tracing::debug!("Feed finished: {} lines, {} envelopes", line_no, delivered);
    })
}
