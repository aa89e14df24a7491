//! Outbound message types representing the polymorphic content produced by
//! the host pipeline.
//!
//! A message is an ordered sequence of parts. Part order is significant and
//! is preserved verbatim through capture, concatenation, and forwarding.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single content part within an outbound message.
///
/// # Serialisation
///
/// Parts are serialised with a `type` tag field:
///
/// ```json
/// { "type": "text", "text": "Reminder set." }
/// { "type": "payload", "kind": "image", "data": {"url": "..."} }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessagePart {
    /// Plain text content.
    Text(TextPart),
    /// A typed non-text payload carried opaquely.
    Payload(PayloadPart),
}

/// Text content within an outbound message.
///
/// # Examples
///
/// ```
/// use maillart::bridge::domain::TextPart;
///
/// let text = TextPart::new("Reminder set.");
/// assert!(!text.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextPart {
    /// The text content.
    pub text: String,
}

impl TextPart {
    /// Creates a new text part.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Returns `true` if the text content is empty or whitespace-only.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// A typed non-text payload within an outbound message.
///
/// The bridge does not interpret payload parts; they are buffered and
/// forwarded exactly as the pipeline emitted them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayloadPart {
    /// Payload kind tag assigned by the host platform (image, file, etc.).
    pub kind: String,
    /// Payload body as platform-defined JSON.
    pub data: Value,
}

impl PayloadPart {
    /// Creates a new payload part.
    #[must_use]
    pub fn new(kind: impl Into<String>, data: Value) -> Self {
        Self {
            kind: kind.into(),
            data,
        }
    }
}

/// An ordered message produced by the host pipeline.
///
/// Unlike persisted conversation history, a pipeline response may be
/// legitimately empty: the capture buffer records empty messages as
/// placeholder entries so callers can distinguish "nothing happened" from
/// "something happened but was empty".
///
/// # Examples
///
/// ```
/// use maillart::bridge::domain::OutboundMessage;
///
/// let message = OutboundMessage::text("OK");
/// assert_eq!(message.plain_text(), "OK");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct OutboundMessage {
    parts: Vec<MessagePart>,
}

impl OutboundMessage {
    /// Creates a message from ordered parts. An empty part list is allowed.
    #[must_use]
    pub fn new(parts: Vec<MessagePart>) -> Self {
        Self { parts }
    }

    /// Creates a message containing a single text part.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            parts: vec![MessagePart::Text(TextPart::new(text))],
        }
    }

    /// Creates a message with no parts.
    #[must_use]
    pub const fn empty() -> Self {
        Self { parts: Vec::new() }
    }

    /// Returns the ordered parts.
    #[must_use]
    pub fn parts(&self) -> &[MessagePart] {
        &self.parts
    }

    /// Returns the number of parts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Returns `true` if the message has no parts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Prepends a part, keeping the existing order behind it.
    #[must_use]
    pub fn with_leading_part(mut self, part: MessagePart) -> Self {
        self.parts.insert(0, part);
        self
    }

    /// Concatenates the text parts in order, skipping non-text payloads.
    #[must_use]
    pub fn plain_text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|part| match part {
                MessagePart::Text(text) => Some(text.text.as_str()),
                MessagePart::Payload(_) => None,
            })
            .collect()
    }
}

impl From<Vec<MessagePart>> for OutboundMessage {
    fn from(parts: Vec<MessagePart>) -> Self {
        Self::new(parts)
    }
}
