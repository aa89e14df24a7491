//! In-memory event queue adapter backed by an unbounded channel.

use std::sync::Arc;
use tokio::sync::mpsc;

use crate::bridge::domain::CommandEvent;
use crate::bridge::ports::event_queue::EventQueue;

/// Event queue delivering submitted events to an in-process consumer.
///
/// The consumer half is handed out once at construction; the embedder (or
/// a test pipeline) drains it on its own schedule, mirroring the opacity
/// of a real host pipeline.
#[derive(Debug, Clone)]
pub struct InMemoryEventQueue {
    tx: mpsc::UnboundedSender<Arc<CommandEvent>>,
}

impl InMemoryEventQueue {
    /// Creates a queue and the receiver its consumer drains.
    #[must_use]
    pub fn unbounded() -> (Self, mpsc::UnboundedReceiver<Arc<CommandEvent>>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl EventQueue for InMemoryEventQueue {
    fn submit(&self, event: Arc<CommandEvent>) {
        let invocation_id = event.invocation_id();
        if self.tx.send(event).is_err() {
            tracing::warn!(%invocation_id, "event queue consumer gone; event discarded");
        }
    }
}
