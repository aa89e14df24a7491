//! Command executor façade over the trigger and forwarder.

use std::time::Duration;

use crate::bridge::domain::{CaptureWindow, InvocationOutcome, InvocationRequest};
use crate::bridge::ports::event_queue::EventQueue;
use crate::bridge::ports::outbound::ConversationGateway;
use crate::bridge::services::forwarder::{DEFAULT_FORWARD_PACING, ResponseForwarder};
use crate::bridge::services::trigger::CommandTrigger;

/// Thin façade exposing fixed-default, configurable, and
/// capture-then-forward invocation variants.
///
/// Every variant shares the trigger's failure semantics: no variant
/// fails, and forwarding variants complete silently on a best-effort
/// basis.
#[derive(Debug, Clone)]
pub struct CommandExecutor<Q, G>
where
    Q: EventQueue,
    G: ConversationGateway,
{
    trigger: CommandTrigger<Q>,
    forwarder: ResponseForwarder<G>,
}

impl<Q, G> CommandExecutor<Q, G>
where
    Q: EventQueue,
    G: ConversationGateway,
{
    /// Creates an executor from a trigger and a forwarder.
    #[must_use]
    pub const fn new(trigger: CommandTrigger<Q>, forwarder: ResponseForwarder<G>) -> Self {
        Self { trigger, forwarder }
    }

    /// Runs a command with the default capture window.
    pub async fn run(&self, request: &InvocationRequest) -> InvocationOutcome {
        self.run_with_window(request, CaptureWindow::default()).await
    }

    /// Runs a command with an explicit capture window.
    pub async fn run_with_window(
        &self,
        request: &InvocationRequest,
        window: CaptureWindow,
    ) -> InvocationOutcome {
        self.trigger.invoke(request, window).await
    }

    /// Runs a command and forwards the captured batch with defaults.
    pub async fn run_and_forward(&self, request: &InvocationRequest) {
        self.run_and_forward_with_options(request, CaptureWindow::default(), DEFAULT_FORWARD_PACING)
            .await;
    }

    /// Runs a command, then forwards the captured batch (or a failure
    /// notice) to the request's conversation with explicit options.
    pub async fn run_and_forward_with_options(
        &self,
        request: &InvocationRequest,
        window: CaptureWindow,
        pacing: Duration,
    ) {
        let outcome = self.trigger.invoke(request, window).await;
        self.forwarder
            .forward(
                request.conversation(),
                request.command_text(),
                &outcome,
                pacing,
            )
            .await;
    }
}
