//! Capture-then-forward behaviour and pacing.

use std::sync::Arc;
use std::time::Duration;

use rstest::rstest;
use tokio::time::Instant;

use maillart::bridge::adapters::memory::{
    InMemoryEventQueue, RecordingConversationGateway, RecordingOutboundSender,
};
use maillart::bridge::domain::{
    ActorIdentity, CaptureWindow, ConversationKey, InvocationRequest, OutboundMessage,
};
use maillart::bridge::services::{
    CommandExecutor, CommandTrigger, ResponseForwarder, SyntheticEventFactory,
};

use crate::in_memory::helpers::{spawn_responding_pipeline, spawn_silent_pipeline};

fn build_executor() -> (
    CommandExecutor<InMemoryEventQueue, RecordingConversationGateway>,
    tokio::sync::mpsc::UnboundedReceiver<Arc<maillart::bridge::domain::CommandEvent>>,
    Arc<RecordingConversationGateway>,
) {
    let (queue, rx) = InMemoryEventQueue::unbounded();
    let platform = Arc::new(RecordingOutboundSender::new());
    let gateway = Arc::new(RecordingConversationGateway::new());
    let executor = CommandExecutor::new(
        CommandTrigger::new(Arc::new(queue), SyntheticEventFactory::new(platform)),
        ResponseForwarder::new(gateway.clone()),
    );
    (executor, rx, gateway)
}

fn status_request() -> InvocationRequest {
    InvocationRequest::new(
        ConversationKey::new("room1"),
        "/status",
        ActorIdentity::new("user1"),
    )
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn three_captured_messages_become_three_paced_deliveries() {
    let (executor, rx, gateway) = build_executor();
    spawn_responding_pipeline(
        rx,
        Duration::from_millis(150),
        vec!["one".to_owned(), "two".to_owned(), "three".to_owned()],
    );
    let pacing = Duration::from_millis(500);

    let started = Instant::now();
    executor
        .run_and_forward_with_options(
            &status_request(),
            CaptureWindow::new(Duration::from_secs(2), Duration::from_millis(100)),
            pacing,
        )
        .await;
    let elapsed = started.elapsed();

    let deliveries = gateway.deliveries();
    assert_eq!(deliveries.len(), 3);
    let texts: Vec<String> = deliveries
        .iter()
        .map(|(_, message)| message.plain_text())
        .collect();
    assert_eq!(texts, ["one", "two", "three"]);

    // Capture takes two poll ticks; pacing applies twice, not thrice.
    let forwarding_time = elapsed - Duration::from_millis(200);
    assert_eq!(forwarding_time, pacing * 2);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn failed_capture_forwards_exactly_one_notice() {
    let (executor, rx, gateway) = build_executor();
    spawn_silent_pipeline(rx);

    executor
        .run_and_forward_with_options(
            &status_request(),
            CaptureWindow::new(Duration::from_secs(1), Duration::from_millis(50)),
            Duration::from_millis(500),
        )
        .await;

    let deliveries = gateway.deliveries();
    assert_eq!(deliveries.len(), 1);
    let (conversation, message) = deliveries.first().expect("one delivery should exist");
    assert_eq!(conversation.as_str(), "room1");
    let text = message.plain_text();
    assert!(
        text.contains("'/status'") && (text.contains("failed") || text.contains("timed out")),
        "notice should name the command and state the failure: {text}"
    );
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn forwarding_keeps_payload_parts_verbatim() {
    let (queue, mut rx) = InMemoryEventQueue::unbounded();
    let platform = Arc::new(RecordingOutboundSender::new());
    let gateway = Arc::new(RecordingConversationGateway::new());
    let executor = CommandExecutor::new(
        CommandTrigger::new(Arc::new(queue), SyntheticEventFactory::new(platform)),
        ResponseForwarder::new(gateway.clone()),
    );

    tokio::spawn(async move {
        use maillart::bridge::domain::{MessagePart, PayloadPart, TextPart};
        if let Some(event) = rx.recv().await {
            let message = OutboundMessage::new(vec![
                MessagePart::Text(TextPart::new("caption: ")),
                MessagePart::Payload(PayloadPart::new(
                    "image",
                    serde_json::json!({"url": "https://example.test/a.png"}),
                )),
            ]);
            event.send(message).await;
        }
    });

    executor.run_and_forward(&status_request()).await;

    let deliveries = gateway.deliveries();
    assert_eq!(deliveries.len(), 1);
    let (_, message) = deliveries.first().expect("one delivery should exist");
    assert_eq!(message.parts().len(), 2, "part order and count preserved");
    assert_eq!(message.plain_text(), "caption: ");
}
