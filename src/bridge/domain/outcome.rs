//! Invocation outcome reported by the bridge.

use serde::{Deserialize, Serialize};

use super::OutboundMessage;

/// The result of one bridge invocation.
///
/// The captured batch preserves the pipeline's emission order and is
/// immutable once the wait loop has finished. An invocation succeeded if
/// and only if at least one message was captured before the deadline.
///
/// # Examples
///
/// ```
/// use maillart::bridge::domain::{InvocationOutcome, OutboundMessage};
///
/// let outcome = InvocationOutcome::captured(vec![OutboundMessage::text("OK")]);
/// assert!(outcome.succeeded());
///
/// let timed_out = InvocationOutcome::captured(Vec::new());
/// assert!(!timed_out.succeeded());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvocationOutcome {
    succeeded: bool,
    messages: Vec<OutboundMessage>,
}

impl InvocationOutcome {
    /// Creates an outcome from the capture buffer's final contents.
    ///
    /// Success is derived from the batch: an empty batch is a failed
    /// invocation.
    #[must_use]
    pub fn captured(messages: Vec<OutboundMessage>) -> Self {
        Self {
            succeeded: !messages.is_empty(),
            messages,
        }
    }

    /// Creates the outcome reported for internal failures.
    #[must_use]
    pub const fn failure() -> Self {
        Self {
            succeeded: false,
            messages: Vec::new(),
        }
    }

    /// Returns `true` when at least one message was captured.
    #[must_use]
    pub const fn succeeded(&self) -> bool {
        self.succeeded
    }

    /// Returns the captured batch in emission order.
    #[must_use]
    pub fn messages(&self) -> &[OutboundMessage] {
        &self.messages
    }

    /// Consumes the outcome, yielding the captured batch.
    #[must_use]
    pub fn into_messages(self) -> Vec<OutboundMessage> {
        self.messages
    }
}
