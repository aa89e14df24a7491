//! Recording outbound sender adapter.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::bridge::domain::{ConversationKey, OutboundMessage, OutboundSender};

/// Outbound sender that records sent messages instead of delivering them.
///
/// Stands in for the host platform's real delivery capability. Messages
/// that reach it after an interception window has closed represent real
/// deliveries, which lets tests observe the restore invariant.
#[derive(Debug, Clone, Default)]
pub struct RecordingOutboundSender {
    sent: Arc<Mutex<Vec<(ConversationKey, OutboundMessage)>>>,
    rejecting: Arc<AtomicBool>,
}

impl RecordingOutboundSender {
    /// Creates an empty recording sender.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent sends report failure (or success again).
    pub fn set_rejecting(&self, rejecting: bool) {
        self.rejecting.store(rejecting, Ordering::SeqCst);
    }

    /// Returns a snapshot of sent messages in arrival order.
    #[must_use]
    pub fn sent(&self) -> Vec<(ConversationKey, OutboundMessage)> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl OutboundSender for RecordingOutboundSender {
    async fn send(&self, conversation: &ConversationKey, message: OutboundMessage) -> bool {
        if self.rejecting.load(Ordering::SeqCst) {
            return false;
        }
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((conversation.clone(), message));
        true
    }
}
