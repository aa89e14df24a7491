//! Response interception: diverting one event's outbound channel into a
//! capture buffer.
//!
//! Installing the interceptor swaps the event's send capability for a
//! capturing one; the binding holds the original and restores it exactly
//! once. Restoration also runs on drop, so the event's delivery behaviour
//! survives every exit path of an invocation, including panics.

use async_trait::async_trait;
use std::sync::{Arc, Mutex, PoisonError};

use crate::bridge::domain::{
    CommandEvent, ConversationKey, DeliveryFlag, DetachedEventError, OutboundMessage,
    OutboundSender,
};

/// Ordered in-memory store of messages captured during one interception
/// window.
///
/// Appends happen from whichever task the host pipeline runs the send on;
/// the waiting loop only reads. A single advisory lock keeps the append
/// and the emptiness check from tearing.
#[derive(Debug, Clone, Default)]
pub struct CaptureBuffer {
    entries: Arc<Mutex<Vec<OutboundMessage>>>,
}

impl CaptureBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn append(&self, message: OutboundMessage) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message);
    }

    /// Returns the number of captured messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` while nothing has been captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the captured messages in emission order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<OutboundMessage> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Capturing replacement for an event's outbound capability.
///
/// Every received message is recorded in arrival order, including empty
/// ones, which become placeholder entries. The send always reports
/// success so the pipeline proceeds as if delivery happened.
struct CapturingSender {
    buffer: CaptureBuffer,
    delivered: DeliveryFlag,
}

#[async_trait]
impl OutboundSender for CapturingSender {
    async fn send(&self, _conversation: &ConversationKey, message: OutboundMessage) -> bool {
        if message.is_empty() {
            tracing::debug!("captured empty pipeline message; recording placeholder entry");
        } else {
            tracing::debug!(parts = message.len(), "captured pipeline message");
        }
        self.buffer.append(message);
        self.delivered.mark();
        true
    }
}

/// Transient association between one event, its original capability, and a
/// capture buffer.
///
/// At most one binding is active per event. [`restore`](Self::restore) is
/// idempotent and also runs on drop.
pub struct InterceptionBinding {
    event: Arc<CommandEvent>,
    original: Option<Arc<dyn OutboundSender>>,
    buffer: CaptureBuffer,
}

impl InterceptionBinding {
    /// Returns the buffer receiving captured messages.
    #[must_use]
    pub const fn buffer(&self) -> &CaptureBuffer {
        &self.buffer
    }

    /// Returns `true` once the original capability has been restored.
    #[must_use]
    pub const fn is_restored(&self) -> bool {
        self.original.is_none()
    }

    /// Restores the event's original outbound capability.
    ///
    /// Calling it twice is a no-op; the capability is put back exactly
    /// once per invocation.
    pub fn restore(&mut self) {
        if let Some(original) = self.original.take() {
            self.event.restore_sender(original);
            tracing::debug!(
                invocation_id = %self.event.invocation_id(),
                "original outbound capability restored"
            );
        }
    }
}

impl Drop for InterceptionBinding {
    fn drop(&mut self) {
        self.restore();
    }
}

impl std::fmt::Debug for InterceptionBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InterceptionBinding")
            .field("event", &self.event)
            .field("restored", &self.is_restored())
            .field("buffer", &self.buffer)
            .finish()
    }
}

/// Installer for capture bindings.
pub struct ResponseInterceptor;

impl ResponseInterceptor {
    /// Replaces the event's outbound capability with a capturing one.
    ///
    /// # Errors
    ///
    /// Returns [`DetachedEventError`] when the event exposes no replaceable
    /// send capability.
    pub fn install(event: &Arc<CommandEvent>) -> Result<InterceptionBinding, DetachedEventError> {
        let buffer = CaptureBuffer::new();
        let capturing = Arc::new(CapturingSender {
            buffer: buffer.clone(),
            delivered: event.delivery_flag(),
        });
        let original = event.replace_sender(capturing)?;
        tracing::debug!(
            invocation_id = %event.invocation_id(),
            conversation = %event.conversation(),
            "message interceptor installed"
        );
        Ok(InterceptionBinding {
            event: Arc::clone(event),
            original: Some(original),
            buffer,
        })
    }
}
