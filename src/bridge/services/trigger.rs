//! The trigger: build, intercept, dispatch, wait, restore.

use std::sync::Arc;
use std::time::Duration;

use crate::bridge::domain::{
    CaptureWindow, DetachedEventError, InvocationOutcome, InvocationRequest,
};
use crate::bridge::ports::event_queue::EventQueue;
use crate::bridge::services::factory::SyntheticEventFactory;
use crate::bridge::services::interceptor::{CaptureBuffer, ResponseInterceptor};

/// Orchestrates one command invocation end to end.
///
/// Per invocation the trigger synthesizes an event, installs the
/// interceptor, submits the event to the host queue, waits with a bounded
/// poll loop, restores the original capability, and reports the captured
/// batch. Restoration happens on every exit path; the binding also
/// restores on drop, so even a panic between dispatch and collection
/// leaves the event's delivery behaviour untouched.
///
/// The host pipeline offers no completion callback, so a send arriving
/// after the deadline reaches the already restored original capability and
/// performs a real delivery. This is a documented open risk, left
/// unresolved deliberately.
#[derive(Debug, Clone)]
pub struct CommandTrigger<Q>
where
    Q: EventQueue,
{
    queue: Arc<Q>,
    factory: SyntheticEventFactory,
}

impl<Q> CommandTrigger<Q>
where
    Q: EventQueue,
{
    /// Creates a trigger submitting to the given queue.
    #[must_use]
    pub const fn new(queue: Arc<Q>, factory: SyntheticEventFactory) -> Self {
        Self { queue, factory }
    }

    /// Invokes a command and captures the pipeline's response.
    ///
    /// This call never fails: internal errors are logged and reported as a
    /// non-succeeded outcome with an empty batch, after best-effort
    /// restoration.
    pub async fn invoke(
        &self,
        request: &InvocationRequest,
        window: CaptureWindow,
    ) -> InvocationOutcome {
        self.capture(request, window).await.unwrap_or_else(|error| {
            tracing::error!(
                command = request.command_text(),
                %error,
                "invocation setup failed"
            );
            InvocationOutcome::failure()
        })
    }

    async fn capture(
        &self,
        request: &InvocationRequest,
        window: CaptureWindow,
    ) -> Result<InvocationOutcome, DetachedEventError> {
        let event = self.factory.synthesize(request);
        let invocation_id = event.invocation_id();
        let mut binding = ResponseInterceptor::install(&event)?;

        self.queue.submit(Arc::clone(&event));
        tracing::debug!(
            %invocation_id,
            command = request.command_text(),
            "synthetic event submitted to host queue"
        );

        let captured = wait_for_capture(binding.buffer(), window).await;
        binding.restore();

        if captured {
            tracing::info!(
                %invocation_id,
                messages = binding.buffer().len(),
                "captured pipeline response"
            );
        } else {
            tracing::warn!(
                %invocation_id,
                command = request.command_text(),
                waited = ?window.max_wait(),
                "no response captured before deadline"
            );
        }

        Ok(InvocationOutcome::captured(binding.buffer().snapshot()))
    }
}

/// Polls the buffer until it is non-empty or the window is exhausted.
///
/// The loop stops at the first non-empty observation, trading completeness
/// for latency: a message the pipeline emits after that poll tick is
/// missed. It never inspects how many messages the pipeline intends to
/// send, because the pipeline does not say.
async fn wait_for_capture(buffer: &CaptureBuffer, window: CaptureWindow) -> bool {
    let mut waited = Duration::ZERO;
    while waited < window.max_wait() {
        tokio::time::sleep(window.poll_interval()).await;
        waited += window.poll_interval();
        if !buffer.is_empty() {
            return true;
        }
    }
    false
}
