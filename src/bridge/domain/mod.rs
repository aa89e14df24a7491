//! Domain types for the capture bridge.

mod event;
mod ids;
mod message;
mod outcome;
mod window;

pub use event::{
    ActorIdentity, CommandEvent, DeliveryFlag, DetachedEventError, InvocationRequest,
    OutboundSender,
};
pub use ids::{ActorId, ConversationKey, InvocationId};
pub use message::{MessagePart, OutboundMessage, PayloadPart, TextPart};
pub use outcome::InvocationOutcome;
pub use window::CaptureWindow;
