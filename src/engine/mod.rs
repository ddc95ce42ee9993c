//! Boundary to the test-execution engine that produces the result stream.
//!
//! The monitor never launches load itself. An engine hands back a channel
//! of [`AggregateEnvelope`] values and closes it when the run concludes.
mod feed;


use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::AppResult;
use crate::snapshot::AggregateEnvelope;

pub use feed::{FEED_CHANNEL_CAPACITY, FeedEngine, decode_line, spawn_feed_reader};

#[async_trait]
pub trait TestEngine: Send {
    /// Starts the run. Closure of the returned channel marks completion.
    ///
    /// # Errors
    ///
    /// Returns an error when the run cannot be started.
    async fn start(&mut self) -> AppResult<mpsc::Receiver<AggregateEnvelope>>;

    /// Tears the run down. Invoked after every dashboard session, including
    /// sessions where `start` failed.
    async fn clean(&mut self);
}
