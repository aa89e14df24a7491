//! Tool function definitions and command bindings.

use serde::{Deserialize, Serialize};

/// Parameter type exposed to the LLM provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolParameterType {
    /// Free-form string value.
    String,
    /// Numeric value.
    Number,
    /// Boolean value.
    Boolean,
}

/// Parameter specification for a tool function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolParameterSpec {
    /// Parameter name.
    pub name: String,
    /// Parameter type.
    pub parameter_type: ToolParameterType,
    /// Human-readable description shown to the LLM.
    pub description: String,
    /// Whether the parameter is required.
    pub required: bool,
}

impl ToolParameterSpec {
    /// Creates a parameter specification.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        parameter_type: ToolParameterType,
        description: impl Into<String>,
        required: bool,
    ) -> Self {
        Self {
            name: name.into(),
            parameter_type,
            description: description.into(),
            required,
        }
    }
}

/// A callable function definition exposed to the LLM provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolFunctionDefinition {
    /// Function name, unique within the registry.
    pub name: String,
    /// Human-readable description shown to the LLM.
    pub description: String,
    /// Parameter definitions in declaration order.
    #[serde(default)]
    pub parameters: Vec<ToolParameterSpec>,
}

impl ToolFunctionDefinition {
    /// Creates a function definition.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
        }
    }

    /// Adds a parameter specification.
    #[must_use]
    pub fn with_parameter(mut self, parameter: ToolParameterSpec) -> Self {
        self.parameters.push(parameter);
        self
    }
}

/// The command a registered function executes when invoked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandBinding {
    /// The mapped command name, without any invocation prefix.
    pub command_name: String,
}

impl CommandBinding {
    /// Creates a command binding.
    #[must_use]
    pub fn new(command_name: impl Into<String>) -> Self {
        Self {
            command_name: command_name.into(),
        }
    }
}

/// A registry entry: the exposed definition plus its command binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredFunction {
    /// The function definition exposed to the LLM.
    pub definition: ToolFunctionDefinition,
    /// The command executed when the function is invoked.
    pub binding: CommandBinding,
}

impl RegisteredFunction {
    /// Creates a registry entry.
    #[must_use]
    pub const fn new(definition: ToolFunctionDefinition, binding: CommandBinding) -> Self {
        Self {
            definition,
            binding,
        }
    }

    /// Returns the function name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.definition.name
    }
}
