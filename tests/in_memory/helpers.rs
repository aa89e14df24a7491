//! Shared test helpers for in-memory integration tests.

use std::sync::Arc;
use std::time::Duration;

use mockable::DefaultClock;
use tokio::sync::mpsc::UnboundedReceiver;

use maillart::bridge::adapters::memory::{
    InMemoryEventQueue, RecordingConversationGateway, RecordingOutboundSender,
};
use maillart::bridge::domain::{ActorIdentity, CommandEvent, ConversationKey, OutboundMessage};
use maillart::bridge::services::{
    CommandExecutor, CommandTrigger, ResponseForwarder, SyntheticEventFactory,
};
use maillart::mapping::adapters::memory::InMemoryConfigStore;
use maillart::mapping::domain::PluginConfig;
use maillart::mapping::services::MappingStore;
use maillart::processor::{CommandOrigin, CommandProcessor};
use maillart::registry::adapters::memory::InMemoryToolFunctionRegistry;
use maillart::registry::services::FunctionSync;

/// Fully wired processor over in-memory adapters.
pub type TestProcessor = CommandProcessor<
    InMemoryEventQueue,
    RecordingConversationGateway,
    InMemoryConfigStore,
    InMemoryToolFunctionRegistry,
    DefaultClock,
>;

/// Everything a processor test needs to observe the system.
pub struct Harness {
    /// The processor under test.
    pub processor: TestProcessor,
    /// Records real conversation deliveries.
    pub gateway: Arc<RecordingConversationGateway>,
    /// The mapping store backing the processor.
    pub mappings: MappingStore<InMemoryConfigStore>,
    /// The function sync backing the processor.
    pub functions: Arc<FunctionSync<InMemoryConfigStore, InMemoryToolFunctionRegistry>>,
    /// Records sends reaching the platform capability after restore.
    pub platform: Arc<RecordingOutboundSender>,
}

/// Builds a processor harness over the given configuration.
pub fn build_harness(config: PluginConfig) -> (Harness, UnboundedReceiver<Arc<CommandEvent>>) {
    let (queue, rx) = InMemoryEventQueue::unbounded();
    let platform = Arc::new(RecordingOutboundSender::new());
    let gateway = Arc::new(RecordingConversationGateway::new());
    let store = Arc::new(InMemoryConfigStore::with_config(config));
    let mappings = MappingStore::new(store);
    let registry = Arc::new(InMemoryToolFunctionRegistry::new());
    let functions = Arc::new(FunctionSync::new(mappings.clone(), registry));

    let executor = CommandExecutor::new(
        CommandTrigger::new(Arc::new(queue), SyntheticEventFactory::new(platform.clone())),
        ResponseForwarder::new(gateway.clone()),
    );
    let processor = CommandProcessor::new(
        mappings.clone(),
        executor,
        gateway.clone(),
        functions.clone(),
        Arc::new(DefaultClock),
    );

    (
        Harness {
            processor,
            gateway,
            mappings,
            functions,
            platform,
        },
        rx,
    )
}

/// The conversation and actor used by most tests.
pub fn origin() -> CommandOrigin {
    CommandOrigin::new(
        ConversationKey::new("room1"),
        ActorIdentity::new("user1").with_display_name("User One"),
    )
}

/// Spawns a simulated opaque host pipeline: every received event is
/// answered with the given replies after the given delay.
pub fn spawn_responding_pipeline(
    mut rx: UnboundedReceiver<Arc<CommandEvent>>,
    delay: Duration,
    replies: Vec<String>,
) {
    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            tokio::time::sleep(delay).await;
            for reply in &replies {
                event.send(OutboundMessage::text(reply.clone())).await;
            }
        }
    });
}

/// Spawns a pipeline that consumes events without ever answering.
pub fn spawn_silent_pipeline(mut rx: UnboundedReceiver<Arc<CommandEvent>>) {
    tokio::spawn(async move { while rx.recv().await.is_some() {} });
}
