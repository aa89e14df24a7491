//! The command processor service.

use mockable::Clock;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use crate::bridge::domain::{
    ActorIdentity, ConversationKey, InvocationRequest, MessagePart, OutboundMessage, TextPart,
};
use crate::bridge::ports::event_queue::EventQueue;
use crate::bridge::ports::outbound::ConversationGateway;
use crate::bridge::services::CommandExecutor;
use crate::mapping::domain::{MappingEntry, MappingStateFilter, ResponseMode};
use crate::mapping::error::MappingError;
use crate::mapping::ports::store::ConfigStore;
use crate::mapping::services::{AddMappingRequest, MappingStore};
use crate::registry::ports::ToolFunctionRegistry;
use crate::registry::services::FunctionSync;

use super::prefix::resolve_full_command;

const PLUGIN_DISABLED_NOTICE: &str =
    "The plugin is currently disabled. Enable basic.enable_plugin before use.";

/// Where a processor call originates: the real conversation and actor the
/// invocation is attributed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOrigin {
    /// The conversation the command runs in and results return to.
    pub conversation: ConversationKey,
    /// The actor the synthetic event is attributed to.
    pub actor: ActorIdentity,
}

impl CommandOrigin {
    /// Creates a command origin.
    #[must_use]
    pub const fn new(conversation: ConversationKey, actor: ActorIdentity) -> Self {
        Self {
            conversation,
            actor,
        }
    }
}

/// Application façade: executes mapped commands through the bridge and
/// administers the mapping store.
///
/// Every public operation returns plain status text and never fails;
/// internal errors are logged and surface as a generic status naming the
/// command, never as raw error detail.
pub struct CommandProcessor<Q, G, S, R, C>
where
    Q: EventQueue,
    G: ConversationGateway,
    S: ConfigStore,
    R: ToolFunctionRegistry,
    C: Clock + Send + Sync,
{
    mappings: MappingStore<S>,
    executor: CommandExecutor<Q, G>,
    gateway: Arc<G>,
    functions: Arc<FunctionSync<S, R>>,
    clock: Arc<C>,
}

impl<Q, G, S, R, C> CommandProcessor<Q, G, S, R, C>
where
    Q: EventQueue,
    G: ConversationGateway,
    S: ConfigStore,
    R: ToolFunctionRegistry,
    C: Clock + Send + Sync,
{
    /// Creates a processor.
    #[must_use]
    pub const fn new(
        mappings: MappingStore<S>,
        executor: CommandExecutor<Q, G>,
        gateway: Arc<G>,
        functions: Arc<FunctionSync<S, R>>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            mappings,
            executor,
            gateway,
            functions,
            clock,
        }
    }

    /// Executes a mapped command and reports status text.
    pub async fn execute(&self, origin: &CommandOrigin, command_name: &str, args: &str) -> String {
        self.try_execute(origin, command_name, args)
            .await
            .unwrap_or_else(|error| {
                tracing::error!(command = command_name, %error, "command execution failed");
                format!("An internal error occurred while executing command '{command_name}'")
            })
    }

    /// Executes the command bound to a registered function.
    ///
    /// This is the entry point used when the LLM invokes one of the
    /// dynamically registered functions.
    pub async fn handle_function_call(
        &self,
        function_name: &str,
        origin: &CommandOrigin,
        args: &str,
    ) -> String {
        let binding = match self.functions.find_binding(function_name) {
            Ok(binding) => binding,
            Err(error) => {
                tracing::error!(function = function_name, %error, "binding lookup failed");
                return format!(
                    "An internal error occurred while resolving function '{function_name}'"
                );
            }
        };
        let Some(binding) = binding else {
            return format!("Function '{function_name}' is not registered");
        };
        self.execute(origin, &binding.command_name, args).await
    }

    async fn try_execute(
        &self,
        origin: &CommandOrigin,
        command_name: &str,
        args: &str,
    ) -> Result<String, MappingError> {
        if !self.mappings.is_plugin_enabled()? {
            return Ok(PLUGIN_DISABLED_NOTICE.to_owned());
        }

        let Some(mapping) = self.mappings.get(command_name, true)? else {
            return Ok(format!(
                "No mapping found for command '{command_name}'. Add one before invoking it."
            ));
        };
        tracing::info!(
            command = command_name,
            function = mapping.llm_function,
            "executing mapped command"
        );

        let prefixes = self.mappings.wake_prefixes()?;
        let full_command = resolve_full_command(&prefixes, command_name, args);
        let window = self.mappings.capture_window()?;
        let mode = self.mappings.response_mode()?;

        let request = InvocationRequest::new(
            origin.conversation.clone(),
            full_command,
            origin.actor.clone(),
        );
        let outcome = self.executor.run_with_window(&request, window).await;

        if !outcome.succeeded() {
            return Ok(format!("Command '{command_name}' failed or timed out"));
        }

        if mode.is_forwarding() {
            let pacing = self.mappings.forward_pacing()?;
            self.forward_with_header(origin, command_name, outcome.messages(), pacing)
                .await;
        }

        Ok(success_status(mode, command_name, outcome.messages()))
    }

    /// Re-emits captured messages to the origin conversation, each headed
    /// by a `[command]` line, paced between consecutive messages.
    async fn forward_with_header(
        &self,
        origin: &CommandOrigin,
        command_name: &str,
        messages: &[OutboundMessage],
        pacing: Duration,
    ) {
        tracing::info!(
            count = messages.len(),
            command = command_name,
            "forwarding captured responses"
        );
        for (index, message) in messages.iter().enumerate() {
            let headed = message.clone().with_leading_part(MessagePart::Text(
                TextPart::new(format!("[command] {command_name}\n")),
            ));
            if let Err(error) = self
                .gateway
                .send_to_conversation(&origin.conversation, headed)
                .await
            {
                tracing::warn!(%error, "forwarding captured response failed");
            }
            if index + 1 < messages.len() {
                tokio::time::sleep(pacing).await;
            }
        }
    }

    /// Adds a mapping and reports status text.
    #[must_use]
    pub fn add_mapping(
        &self,
        command_name: &str,
        llm_function: &str,
        description: &str,
    ) -> String {
        let result = self.try_add(command_name, llm_function, description);
        self.admin_status(result, "adding the mapping")
    }

    fn try_add(
        &self,
        command_name: &str,
        llm_function: &str,
        description: &str,
    ) -> Result<String, MappingError> {
        if !self.mappings.is_plugin_enabled()? {
            return Ok(PLUGIN_DISABLED_NOTICE.to_owned());
        }
        let entry = self.mappings.add(
            &AddMappingRequest::new(command_name, llm_function, description),
            &*self.clock,
        )?;
        self.refresh_if_configured();
        Ok(format!(
            "Added mapping: '{}' -> '{}'",
            entry.command_name, entry.llm_function
        ))
    }

    /// Removes a mapping and reports status text.
    #[must_use]
    pub fn remove_mapping(&self, command_name: &str) -> String {
        let result = self.try_remove(command_name);
        self.admin_status(result, "removing the mapping")
    }

    fn try_remove(&self, command_name: &str) -> Result<String, MappingError> {
        if !self.mappings.is_plugin_enabled()? {
            return Ok(PLUGIN_DISABLED_NOTICE.to_owned());
        }
        self.mappings.remove(command_name)?;
        self.refresh_if_configured();
        Ok(format!("Removed mapping for command '{}'", command_name.trim()))
    }

    /// Enables or disables a mapping and reports status text.
    #[must_use]
    pub fn set_mapping_enabled(&self, command_name: &str, enabled: bool) -> String {
        let result = self.try_set_enabled(command_name, enabled);
        let action = if enabled {
            "enabling the mapping"
        } else {
            "disabling the mapping"
        };
        self.admin_status(result, action)
    }

    fn try_set_enabled(&self, command_name: &str, enabled: bool) -> Result<String, MappingError> {
        if !self.mappings.is_plugin_enabled()? {
            return Ok(PLUGIN_DISABLED_NOTICE.to_owned());
        }
        self.mappings.set_enabled(command_name, enabled)?;
        self.refresh_if_configured();
        let state = if enabled { "Enabled" } else { "Disabled" };
        Ok(format!("{state} mapping for command '{}'", command_name.trim()))
    }

    /// Lists mappings matching a filter token and reports formatted text.
    ///
    /// Accepts `all`, `enabled`, and `disabled`, with or without a
    /// leading `--`.
    #[must_use]
    pub fn list_mappings(&self, filter_token: &str) -> String {
        let Some(filter) = MappingStateFilter::parse(filter_token) else {
            return "Invalid filter; expected --enabled, --disabled, or --all".to_owned();
        };
        let result = self.try_list(filter);
        self.admin_status(result, "listing the mappings")
    }

    fn try_list(&self, filter: MappingStateFilter) -> Result<String, MappingError> {
        if !self.mappings.is_plugin_enabled()? {
            return Ok(PLUGIN_DISABLED_NOTICE.to_owned());
        }
        let listed = self.mappings.list(filter)?;
        Ok(format_listing(filter, &listed))
    }

    /// Re-registers the dynamic functions and reports status text.
    #[must_use]
    pub fn refresh_functions(&self) -> String {
        self.functions.refresh().map_or_else(
            |error| {
                tracing::error!(%error, "function refresh failed");
                "An internal error occurred while refreshing functions".to_owned()
            },
            |_| {
                format!(
                    "Refresh complete; {} functions registered",
                    self.functions.registered().len()
                )
            },
        )
    }

    fn refresh_if_configured(&self) {
        match self.mappings.auto_refresh_on_change() {
            Ok(true) => {
                if let Err(error) = self.functions.refresh() {
                    tracing::error!(%error, "automatic function refresh failed");
                }
            }
            Ok(false) => {}
            Err(error) => {
                tracing::error!(%error, "could not read auto-refresh setting");
            }
        }
    }

    fn admin_status(&self, result: Result<String, MappingError>, action: &str) -> String {
        match result {
            Ok(status) => status,
            Err(MappingError::Store(error)) => {
                tracing::error!(%error, action, "mapping administration failed");
                format!("An internal error occurred while {action}")
            }
            Err(error) => error.to_string(),
        }
    }
}

fn success_status(mode: ResponseMode, command_name: &str, messages: &[OutboundMessage]) -> String {
    let texts: Vec<String> = messages
        .iter()
        .map(OutboundMessage::plain_text)
        .filter(|text| !text.is_empty())
        .collect();

    if texts.is_empty() {
        return format!("Command '{command_name}' executed but returned no text content");
    }
    match mode {
        ResponseMode::ForwardOnly => format!(
            "Command '{command_name}' executed; the captured response was forwarded to the conversation"
        ),
        ResponseMode::ForwardAndText | ResponseMode::TextOnly => {
            format!("Command '{command_name}' response:\n{}", texts.join("\n"))
        }
    }
}

fn format_listing(filter: MappingStateFilter, listed: &BTreeMap<String, MappingEntry>) -> String {
    if listed.is_empty() {
        return match filter {
            MappingStateFilter::All => "No command mappings are configured".to_owned(),
            MappingStateFilter::Enabled => "No enabled command mappings".to_owned(),
            MappingStateFilter::Disabled => "No disabled command mappings".to_owned(),
        };
    }

    let title = match filter {
        MappingStateFilter::All => "Configured command mappings:",
        MappingStateFilter::Enabled => "Enabled command mappings:",
        MappingStateFilter::Disabled => "Disabled command mappings:",
    };
    let mut output = title.to_owned();
    for (position, (command_name, entry)) in listed.iter().enumerate() {
        output.push('\n');
        output.push_str(&format!(
            "{}. {} -> {}",
            position + 1,
            command_name,
            entry.llm_function
        ));
        if !entry.description.is_empty() {
            output.push_str(&format!(" ({})", entry.description));
        }
        if !entry.enabled {
            output.push_str(" [disabled]");
        }
    }
    output
}
