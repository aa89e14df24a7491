//! Projection of enabled mappings into registered tool functions.

use std::collections::BTreeSet;
use std::sync::{Arc, PoisonError, RwLock};
use thiserror::Error;

use crate::mapping::domain::{MappingEntry, MappingStateFilter, ToolConfig};
use crate::mapping::error::MappingError;
use crate::mapping::ports::store::ConfigStore;
use crate::mapping::services::MappingStore;
use crate::registry::domain::{
    CommandBinding, RegisteredFunction, ToolFunctionDefinition, ToolParameterSpec,
    ToolParameterType,
};
use crate::registry::ports::{ToolFunctionRegistry, ToolFunctionRegistryError};

/// Errors from function synchronisation.
#[derive(Debug, Clone, Error)]
pub enum FunctionSyncError {
    /// Reading the mappings failed.
    #[error(transparent)]
    Mapping(#[from] MappingError),

    /// The registry rejected an operation.
    #[error(transparent)]
    Registry(#[from] ToolFunctionRegistryError),
}

/// Keeps the tool function registry aligned with the enabled mappings.
///
/// The service tracks its own registrations so a shared registry is never
/// stripped of functions owned by someone else. Both directions are
/// idempotent: synchronising twice registers nothing new, and refreshing
/// converges to exactly the enabled-mapping set.
pub struct FunctionSync<S, R>
where
    S: ConfigStore,
    R: ToolFunctionRegistry,
{
    mappings: MappingStore<S>,
    registry: Arc<R>,
    registered: RwLock<BTreeSet<String>>,
}

impl<S, R> FunctionSync<S, R>
where
    S: ConfigStore,
    R: ToolFunctionRegistry,
{
    /// Creates a sync service over a mapping store and a registry.
    #[must_use]
    pub const fn new(mappings: MappingStore<S>, registry: Arc<R>) -> Self {
        Self {
            mappings,
            registry,
            registered: RwLock::new(BTreeSet::new()),
        }
    }

    /// Registers one function per enabled mapping not yet registered by
    /// this service.
    ///
    /// Returns the number of newly registered functions. Does nothing
    /// when the plugin is disabled.
    ///
    /// # Errors
    ///
    /// Returns [`FunctionSyncError`] when the mappings cannot be read or
    /// the registry rejects a registration.
    pub fn sync(&self) -> Result<usize, FunctionSyncError> {
        if !self.mappings.is_plugin_enabled().map_err(MappingError::from)? {
            tracing::info!("plugin disabled; skipping function registration");
            return Ok(0);
        }

        let tool_config = self.mappings.config().map_err(MappingError::from)?.tool;
        let enabled = self.mappings.list(MappingStateFilter::Enabled)?;

        let mut newly_registered = 0_usize;
        for (command_name, entry) in enabled {
            let function_name = entry.llm_function.clone();
            if self.is_tracked(&function_name) {
                continue;
            }

            let function = build_function(&command_name, &entry, &tool_config);
            self.registry.register(function)?;
            self.track(function_name.clone());
            newly_registered += 1;
            tracing::info!(
                function = function_name,
                command = command_name,
                "tool function registered"
            );
        }

        Ok(newly_registered)
    }

    /// Unregisters every function this service registered.
    ///
    /// Returns the number of functions removed from the registry.
    /// Registry failures for individual functions are logged and skipped
    /// so the rest still unregister.
    #[must_use = "the count reports how many registrations were actually removed"]
    pub fn unregister_all(&self) -> usize {
        let tracked: Vec<String> = {
            let registered = self
                .registered
                .read()
                .unwrap_or_else(PoisonError::into_inner);
            registered.iter().cloned().collect()
        };

        let mut removed = 0_usize;
        for function_name in tracked {
            match self.registry.unregister(&function_name) {
                Ok(was_present) => {
                    self.untrack(&function_name);
                    if was_present {
                        removed += 1;
                        tracing::info!(function = function_name, "tool function unregistered");
                    }
                }
                Err(error) => {
                    tracing::error!(function = function_name, %error, "unregister failed");
                }
            }
        }
        removed
    }

    /// Unregisters everything this service registered, then synchronises
    /// again from the current mappings.
    ///
    /// Returns the number of functions registered by the new pass.
    ///
    /// # Errors
    ///
    /// Returns [`FunctionSyncError`] when the re-synchronisation fails.
    pub fn refresh(&self) -> Result<usize, FunctionSyncError> {
        let removed = self.unregister_all();
        tracing::debug!(removed, "refreshing tool functions");
        self.sync()
    }

    /// Looks up the command binding of a registered function.
    ///
    /// # Errors
    ///
    /// Returns [`FunctionSyncError`] when registry access fails.
    pub fn find_binding(
        &self,
        function_name: &str,
    ) -> Result<Option<CommandBinding>, FunctionSyncError> {
        Ok(self
            .registry
            .find_by_name(function_name)?
            .map(|function| function.binding))
    }

    /// Lists the functions this service currently has registered.
    #[must_use]
    pub fn registered(&self) -> Vec<String> {
        self.registered
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    fn is_tracked(&self, function_name: &str) -> bool {
        self.registered
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(function_name)
    }

    fn track(&self, function_name: String) {
        self.registered
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(function_name);
    }

    fn untrack(&self, function_name: &str) {
        self.registered
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(function_name);
    }
}

/// Builds the exposed function for one mapping.
///
/// The description stitches together the command name, the mapping's own
/// description, and the global tool description. Parameters are a fixed
/// `command_text` plus an optional free-form `args` string.
fn build_function(
    command_name: &str,
    entry: &MappingEntry,
    tool_config: &ToolConfig,
) -> RegisteredFunction {
    let mut description = format!("Executes the '{command_name}' command");
    if !entry.description.is_empty() {
        description.push_str(", ");
        description.push_str(&entry.description);
    }
    let global = tool_config.tool_description.trim();
    if !global.is_empty() {
        description.push_str(". ");
        description.push_str(global);
    }

    let arg_description = if entry.arg_description.is_empty() {
        tool_config.arg_description.trim().to_owned()
    } else {
        entry.arg_description.clone()
    };

    let definition = ToolFunctionDefinition::new(&entry.llm_function, description)
        .with_parameter(ToolParameterSpec::new(
            "command_text",
            ToolParameterType::String,
            format!("The command to execute; fixed to '{command_name}'"),
            true,
        ))
        .with_parameter(ToolParameterSpec::new(
            "args",
            ToolParameterType::String,
            arg_description,
            false,
        ));

    RegisteredFunction::new(definition, CommandBinding::new(command_name))
}
