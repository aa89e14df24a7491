//! Synthetic event factory.

use std::fmt;
use std::sync::Arc;

use crate::bridge::domain::{CommandEvent, InvocationRequest, OutboundSender};

/// Builds synthetic command events wired to the host's delivery capability.
///
/// Events produced by the factory are indistinguishable to downstream
/// handlers from genuine user messages: they carry the conversation key the
/// pipeline routes on, the fully formed command text, the actor identity,
/// and the platform's real outbound capability. Synthesis has no side
/// effects; submission is owned by the trigger.
#[derive(Clone)]
pub struct SyntheticEventFactory {
    platform_sender: Option<Arc<dyn OutboundSender>>,
}

impl SyntheticEventFactory {
    /// Creates a factory stamping the given platform capability onto each
    /// synthesized event.
    #[must_use]
    pub const fn new(platform_sender: Arc<dyn OutboundSender>) -> Self {
        Self {
            platform_sender: Some(platform_sender),
        }
    }

    /// Creates a factory with no platform capability.
    ///
    /// This mirrors the failure mode where the host cannot resolve a
    /// delivery channel for the target conversation: events synthesized by
    /// such a factory are detached, so interception fails and the
    /// invocation is reported as unsuccessful.
    #[must_use]
    pub const fn detached() -> Self {
        Self {
            platform_sender: None,
        }
    }

    /// Builds one synthetic event for the given request.
    #[must_use]
    pub fn synthesize(&self, request: &InvocationRequest) -> Arc<CommandEvent> {
        let event = self.platform_sender.as_ref().map_or_else(
            || CommandEvent::detached(request.clone()),
            |sender| CommandEvent::new(request.clone(), Arc::clone(sender)),
        );
        Arc::new(event)
    }
}

impl fmt::Debug for SyntheticEventFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyntheticEventFactory")
            .field("platform_sender", &self.platform_sender.is_some())
            .finish()
    }
}
