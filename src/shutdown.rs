use tokio::sync::broadcast;

/// Fan-in sink for cancellation events. Every producer holds a clone.
pub type ShutdownSender = broadcast::Sender<()>;
pub type ShutdownReceiver = broadcast::Receiver<()>;
