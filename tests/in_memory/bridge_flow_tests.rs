//! Capture round trips against a simulated host pipeline.

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

type TestExecutor = CommandExecutor<InMemoryEventQueue, RecordingConversationGateway>;

fn build_executor() -> (
    TestExecutor,
    tokio::sync::mpsc::UnboundedReceiver<Arc<maillart::bridge::domain::CommandEvent>>,
    Arc<RecordingConversationGateway>,
    Arc<RecordingOutboundSender>,
) {
    let (queue, rx) = InMemoryEventQueue::unbounded();
    let platform = Arc::new(RecordingOutboundSender::new());
    let gateway = Arc::new(RecordingConversationGateway::new());
    let executor = CommandExecutor::new(
        CommandTrigger::new(Arc::new(queue), SyntheticEventFactory::new(platform.clone())),
        ResponseForwarder::new(gateway.clone()),
    );
    (executor, rx, gateway, platform)
}

fn status_request() -> InvocationRequest {
    InvocationRequest::new(
        ConversationKey::new("room1"),
        "/status",
        ActorIdentity::new("user1"),
    )
}

fn tight_window() -> CaptureWindow {
    CaptureWindow::new(Duration::from_secs(2), Duration::from_millis(100))
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn timely_answer_is_captured_within_one_poll_tick() {
    let (executor, rx, _gateway, platform) = build_executor();
    spawn_responding_pipeline(rx, Duration::from_millis(300), vec!["OK".to_owned()]);

    let started = Instant::now();
    let outcome = executor
        .run_with_window(&status_request(), tight_window())
        .await;
    let elapsed = started.elapsed();

    assert!(outcome.succeeded());
    assert_eq!(
        outcome.messages().first().map(OutboundMessage::plain_text),
        Some("OK".to_owned())
    );
    assert!(
        elapsed <= Duration::from_millis(500),
        "expected ~0.4s wall time, took {elapsed:?}"
    );
    assert!(platform.sent().is_empty(), "nothing leaked to the platform");
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn silent_pipeline_times_out_after_the_full_window() {
    let (executor, rx, _gateway, _platform) = build_executor();
    spawn_silent_pipeline(rx);

    let started = Instant::now();
    let outcome = executor
        .run_with_window(&status_request(), tight_window())
        .await;
    let elapsed = started.elapsed();

    assert!(!outcome.succeeded());
    assert!(outcome.messages().is_empty());
    assert!(
        elapsed >= Duration::from_secs(2) && elapsed < Duration::from_millis(2200),
        "expected ~2.0s wall time, took {elapsed:?}"
    );
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn burst_responses_are_captured_in_emission_order() {
    let (executor, rx, _gateway, _platform) = build_executor();
    spawn_responding_pipeline(
        rx,
        Duration::from_millis(100),
        vec!["first".to_owned(), "second".to_owned(), "third".to_owned()],
    );

    let outcome = executor
        .run_with_window(&status_request(), tight_window())
        .await;

    let texts: Vec<String> = outcome
        .messages()
        .iter()
        .map(OutboundMessage::plain_text)
        .collect();
    assert_eq!(texts, ["first", "second", "third"]);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn concurrent_invocations_keep_their_buffers_apart() {
    let (queue, mut rx) = InMemoryEventQueue::unbounded();
    let platform = Arc::new(RecordingOutboundSender::new());
    let trigger = CommandTrigger::new(
        Arc::new(queue),
        SyntheticEventFactory::new(platform.clone()),
    );

    // Answer each event with its own command text.
    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let echo = event.command_text().to_owned();
            tokio::time::sleep(Duration::from_millis(100)).await;
            event.send(OutboundMessage::text(echo)).await;
        }
    });

    let first_request = InvocationRequest::new(
        ConversationKey::new("room1"),
        "/first",
        ActorIdentity::new("user1"),
    );
    let second_request = InvocationRequest::new(
        ConversationKey::new("room2"),
        "/second",
        ActorIdentity::new("user2"),
    );

    let (first, second) = tokio::join!(
        trigger.invoke(&first_request, tight_window()),
        trigger.invoke(&second_request, tight_window()),
    );

    assert_eq!(
        first.messages().first().map(OutboundMessage::plain_text),
        Some("/first".to_owned())
    );
    assert_eq!(
        second.messages().first().map(OutboundMessage::plain_text),
        Some("/second".to_owned())
    );
}
