//! Forwarding captured batches to a real conversation.

use std::sync::Arc;
use std::time::Duration;

use crate::bridge::domain::{ConversationKey, InvocationOutcome, OutboundMessage};
use crate::bridge::ports::outbound::ConversationGateway;

/// Default pacing delay between consecutive forwarded messages.
pub const DEFAULT_FORWARD_PACING: Duration = Duration::from_millis(500);

/// Re-emits a captured batch to a real conversation.
///
/// This is the only bridge component performing real conversation I/O.
/// Delivery failures are logged and not retried; they do not change the
/// invocation's success.
#[derive(Debug, Clone)]
pub struct ResponseForwarder<G>
where
    G: ConversationGateway,
{
    gateway: Arc<G>,
}

impl<G> ResponseForwarder<G>
where
    G: ConversationGateway,
{
    /// Creates a forwarder delivering through the given gateway.
    #[must_use]
    pub const fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Forwards an outcome to the conversation.
    ///
    /// On success every captured message is emitted in order, with the
    /// pacing delay inserted between consecutive emissions and skipped
    /// after the last. On failure a single notice naming the attempted
    /// command is emitted instead.
    pub async fn forward(
        &self,
        conversation: &ConversationKey,
        command: &str,
        outcome: &InvocationOutcome,
        pacing: Duration,
    ) {
        if outcome.succeeded() {
            self.forward_batch(conversation, outcome.messages(), pacing)
                .await;
        } else {
            tracing::warn!(command, "forwarding a failure notice; nothing was captured");
            let notice = OutboundMessage::text(format!(
                "Command '{command}' failed or timed out without a response"
            ));
            self.deliver(conversation, notice).await;
        }
    }

    async fn forward_batch(
        &self,
        conversation: &ConversationKey,
        messages: &[OutboundMessage],
        pacing: Duration,
    ) {
        tracing::info!(
            conversation = %conversation,
            count = messages.len(),
            "forwarding captured batch"
        );
        for (index, message) in messages.iter().enumerate() {
            self.deliver(conversation, message.clone()).await;
            if index + 1 < messages.len() {
                tokio::time::sleep(pacing).await;
            }
        }
    }

    async fn deliver(&self, conversation: &ConversationKey, message: OutboundMessage) {
        if let Err(error) = self
            .gateway
            .send_to_conversation(conversation, message)
            .await
        {
            tracing::warn!(conversation = %conversation, %error, "forward delivery failed");
        }
    }
}
