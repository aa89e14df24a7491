//! Recording conversation gateway adapter.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::bridge::domain::{ConversationKey, OutboundMessage};
use crate::bridge::ports::outbound::{ConversationGateway, GatewayError, GatewayResult};

/// Gateway that records deliveries instead of performing platform I/O.
///
/// Used as the embedding default in tests and demos. Deliveries can be
/// made to fail on demand to exercise the forwarder's best-effort path.
#[derive(Debug, Clone, Default)]
pub struct RecordingConversationGateway {
    deliveries: Arc<Mutex<Vec<(ConversationKey, OutboundMessage)>>>,
    failing: Arc<AtomicBool>,
}

impl RecordingConversationGateway {
    /// Creates an empty recording gateway.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent deliveries fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Returns a snapshot of recorded deliveries in arrival order.
    #[must_use]
    pub fn deliveries(&self) -> Vec<(ConversationKey, OutboundMessage)> {
        self.deliveries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl ConversationGateway for RecordingConversationGateway {
    async fn send_to_conversation(
        &self,
        conversation: &ConversationKey,
        message: OutboundMessage,
    ) -> GatewayResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(GatewayError::Rejected("gateway set to fail".to_owned()));
        }
        self.deliveries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((conversation.clone(), message));
        Ok(())
    }
}
