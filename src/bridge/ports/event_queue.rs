//! Host event queue port.
//!
//! The queue is the only way into the host's command-handling pipeline.
//! Submission is non-blocking and fire-and-forget: the pipeline consumes
//! events on its own schedule and offers no completion signal, which is why
//! the bridge waits by polling its capture buffer instead.

use std::sync::Arc;

use crate::bridge::domain::CommandEvent;

/// Port for submitting events into the host's processing queue.
pub trait EventQueue: Send + Sync {
    /// Enqueues an event without blocking.
    ///
    /// The call must not fail and must not wait for the pipeline; an event
    /// that cannot be enqueued is discarded by the adapter.
    fn submit(&self, event: Arc<CommandEvent>);
}
