//! Unit tests for the synthetic event's replaceable capability.

use rstest::rstest;
use std::sync::Arc;

use crate::bridge::adapters::memory::RecordingOutboundSender;
use crate::bridge::domain::{
    ActorIdentity, CommandEvent, ConversationKey, InvocationRequest, OutboundMessage,
};

fn request() -> InvocationRequest {
    InvocationRequest::new(
        ConversationKey::new("platform:group:7"),
        "/remind ls",
        ActorIdentity::new("caller").with_display_name("Caller"),
    )
}

#[rstest]
#[tokio::test]
async fn send_delegates_to_the_wired_capability() {
    let platform = Arc::new(RecordingOutboundSender::new());
    let event = CommandEvent::new(request(), platform.clone());

    assert!(event.send(OutboundMessage::text("hello")).await);

    let sent = platform.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(
        sent.first().map(|(conversation, _)| conversation.as_str()),
        Some("platform:group:7")
    );
}

#[rstest]
#[tokio::test]
async fn send_on_a_detached_event_reports_failure() {
    let event = CommandEvent::detached(request());
    assert!(!event.send(OutboundMessage::text("dropped")).await);
}

#[rstest]
#[tokio::test]
async fn replace_and_restore_round_trip_the_capability() {
    let original = Arc::new(RecordingOutboundSender::new());
    let replacement = Arc::new(RecordingOutboundSender::new());
    let event = CommandEvent::new(request(), original.clone());

    let previous = event
        .replace_sender(replacement.clone())
        .expect("attached event should accept replacement");
    event.send(OutboundMessage::text("captured")).await;

    event.restore_sender(previous);
    event.send(OutboundMessage::text("real")).await;

    assert_eq!(replacement.sent().len(), 1);
    assert_eq!(original.sent().len(), 1);
}

#[rstest]
fn replace_on_a_detached_event_fails_and_leaves_it_detached() {
    let event = CommandEvent::detached(request());
    let replacement = Arc::new(RecordingOutboundSender::new());

    assert!(event.replace_sender(replacement.clone()).is_err());
    assert!(event.replace_sender(replacement).is_err(), "still detached");
}

#[rstest]
fn delivered_flag_is_shared_through_its_handle() {
    let event = CommandEvent::detached(request());
    let flag = event.delivery_flag();

    assert!(!event.is_delivered());
    flag.mark();
    assert!(event.is_delivered());
}

#[rstest]
fn events_expose_their_request_attributes() {
    let platform = Arc::new(RecordingOutboundSender::new());
    let event = CommandEvent::new(request(), platform);

    assert_eq!(event.conversation().as_str(), "platform:group:7");
    assert_eq!(event.command_text(), "/remind ls");
    assert_eq!(event.actor().id().as_str(), "caller");
    assert_eq!(event.actor().display_name(), Some("Caller"));
}
