//! The synthetic command event and its replaceable outbound capability.
//!
//! A [`CommandEvent`] stands in for a real inbound user message. Its
//! outbound channel is an explicit, injectable capability rather than a
//! fixed method: the interceptor swaps the capability for a capturing one
//! and restoration is a pure assignment of the original value. This keeps
//! the redirection local to one event with no global state involved.

use async_trait::async_trait;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use thiserror::Error;

use super::{ActorId, ConversationKey, InvocationId, OutboundMessage};

/// Outbound send capability attached to a [`CommandEvent`].
///
/// The host's implementation performs real delivery to the platform and
/// reports acceptance. Implementations must be safe to call from whichever
/// task the host pipeline runs on.
#[async_trait]
pub trait OutboundSender: Send + Sync {
    /// Delivers one message for the given conversation.
    ///
    /// Returns `true` when the delivery was accepted.
    async fn send(&self, conversation: &ConversationKey, message: OutboundMessage) -> bool;
}

/// The actor a synthetic event is attributed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorIdentity {
    id: ActorId,
    display_name: Option<String>,
}

impl ActorIdentity {
    /// Creates an actor identity without a display name.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: ActorId::new(id),
            display_name: None,
        }
    }

    /// Sets the optional display name.
    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Returns the actor identifier.
    #[must_use]
    pub const fn id(&self) -> &ActorId {
        &self.id
    }

    /// Returns the display name, when one was provided.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }
}

/// The ingredients of one bridge invocation: where the command runs, the
/// fully formed command text (invocation prefix already resolved by the
/// caller), and who it is attributed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationRequest {
    conversation: ConversationKey,
    command_text: String,
    actor: ActorIdentity,
}

impl InvocationRequest {
    /// Creates an invocation request.
    #[must_use]
    pub fn new(
        conversation: ConversationKey,
        command_text: impl Into<String>,
        actor: ActorIdentity,
    ) -> Self {
        Self {
            conversation,
            command_text: command_text.into(),
            actor,
        }
    }

    /// Returns the target conversation key.
    #[must_use]
    pub const fn conversation(&self) -> &ConversationKey {
        &self.conversation
    }

    /// Returns the raw command text.
    #[must_use]
    pub fn command_text(&self) -> &str {
        &self.command_text
    }

    /// Returns the actor identity.
    #[must_use]
    pub const fn actor(&self) -> &ActorIdentity {
        &self.actor
    }
}

/// Shared handle to an event's "already delivered" flag.
///
/// The capturing sender marks the flag through a cloned handle so the host
/// pipeline, which checks it on the event, skips redundant real delivery.
#[derive(Debug, Clone, Default)]
pub struct DeliveryFlag(Arc<AtomicBool>);

impl DeliveryFlag {
    /// Marks the flag as delivered.
    pub fn mark(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Returns `true` once the flag has been marked.
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// The event does not expose a replaceable send capability.
///
/// Only detached events (constructed without a sender) produce this error;
/// it is the single failure mode of interceptor installation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("event does not expose a replaceable send operation")]
pub struct DetachedEventError;

/// A synthetic inbound command event.
///
/// Downstream handlers route and handle the event exactly as they would a
/// genuine user message bearing the same command text in the same
/// conversation. Events are created per invocation and discarded after the
/// wait loop completes; they are never persisted.
///
/// # Invariants
///
/// - The conversation key, command text, and actor are immutable after
///   construction.
/// - At most one interception binding is active per event at a time; the
///   original capability is restored exactly once per invocation.
pub struct CommandEvent {
    invocation_id: InvocationId,
    conversation: ConversationKey,
    command_text: String,
    actor: ActorIdentity,
    delivered: DeliveryFlag,
    sender: RwLock<Option<Arc<dyn OutboundSender>>>,
}

impl CommandEvent {
    /// Creates an event wired to an outbound capability.
    #[must_use]
    pub fn new(request: InvocationRequest, sender: Arc<dyn OutboundSender>) -> Self {
        Self::build(request, Some(sender))
    }

    /// Creates an event without an outbound capability.
    ///
    /// Sending on a detached event reports failure and interception cannot
    /// be installed on it.
    #[must_use]
    pub fn detached(request: InvocationRequest) -> Self {
        Self::build(request, None)
    }

    fn build(request: InvocationRequest, sender: Option<Arc<dyn OutboundSender>>) -> Self {
        Self {
            invocation_id: InvocationId::new(),
            conversation: request.conversation,
            command_text: request.command_text,
            actor: request.actor,
            delivered: DeliveryFlag::default(),
            sender: RwLock::new(sender),
        }
    }

    /// Returns the invocation identifier for log correlation.
    #[must_use]
    pub const fn invocation_id(&self) -> InvocationId {
        self.invocation_id
    }

    /// Returns the target conversation key.
    #[must_use]
    pub const fn conversation(&self) -> &ConversationKey {
        &self.conversation
    }

    /// Returns the raw command text.
    #[must_use]
    pub fn command_text(&self) -> &str {
        &self.command_text
    }

    /// Returns the actor identity.
    #[must_use]
    pub const fn actor(&self) -> &ActorIdentity {
        &self.actor
    }

    /// Marks the event as already delivered so the host pipeline skips any
    /// redundant direct delivery attempt.
    pub fn mark_delivered(&self) {
        self.delivered.mark();
    }

    /// Returns `true` once a delivery (real or captured) has occurred.
    #[must_use]
    pub fn is_delivered(&self) -> bool {
        self.delivered.is_set()
    }

    /// Returns a cloned handle to the delivered flag.
    #[must_use]
    pub fn delivery_flag(&self) -> DeliveryFlag {
        self.delivered.clone()
    }

    /// Sends a message through the event's current outbound capability.
    ///
    /// Returns `false` when the event is detached or the capability
    /// rejects the delivery.
    pub async fn send(&self, message: OutboundMessage) -> bool {
        let current = self
            .sender
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        let Some(sender) = current else {
            tracing::warn!(
                invocation_id = %self.invocation_id,
                "send on detached event discarded"
            );
            return false;
        };
        sender.send(&self.conversation, message).await
    }

    /// Replaces the outbound capability, returning the previous one.
    ///
    /// # Errors
    ///
    /// Returns [`DetachedEventError`] when the event has no capability to
    /// replace.
    pub fn replace_sender(
        &self,
        replacement: Arc<dyn OutboundSender>,
    ) -> Result<Arc<dyn OutboundSender>, DetachedEventError> {
        let mut slot = self.sender.write().unwrap_or_else(PoisonError::into_inner);
        let original = slot.take().ok_or(DetachedEventError)?;
        *slot = Some(replacement);
        Ok(original)
    }

    /// Restores a previously replaced outbound capability.
    ///
    /// Restoration is a plain assignment; it cannot fail.
    pub fn restore_sender(&self, original: Arc<dyn OutboundSender>) {
        let mut slot = self.sender.write().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(original);
    }
}

impl fmt::Debug for CommandEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandEvent")
            .field("invocation_id", &self.invocation_id)
            .field("conversation", &self.conversation)
            .field("command_text", &self.command_text)
            .field("actor", &self.actor)
            .field("delivered", &self.is_delivered())
            .finish_non_exhaustive()
    }
}
