//! Conversation delivery port.
//!
//! The gateway performs real outbound delivery to the host's messaging
//! layer. Within the bridge core only the forwarder is permitted to use
//! it; everything else routes output through an event's
//! [`OutboundSender`](crate::bridge::domain::OutboundSender) capability.

use async_trait::async_trait;
use thiserror::Error;

use crate::bridge::domain::{ConversationKey, OutboundMessage};

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Port for delivering messages to a real conversation.
#[async_trait]
pub trait ConversationGateway: Send + Sync {
    /// Delivers one message to the given conversation.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] when the platform rejects or cannot
    /// complete the delivery.
    async fn send_to_conversation(
        &self,
        conversation: &ConversationKey,
        message: OutboundMessage,
    ) -> GatewayResult<()>;
}

/// Errors for conversation delivery.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    /// The platform rejected the delivery.
    #[error("delivery rejected: {0}")]
    Rejected(String),

    /// The messaging layer is unreachable.
    #[error("messaging layer unavailable: {0}")]
    Unavailable(String),
}
