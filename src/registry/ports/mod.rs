//! Tool function registry port.

use thiserror::Error;

use crate::registry::domain::RegisteredFunction;

/// Result type for registry operations.
pub type ToolFunctionRegistryResult<T> = Result<T, ToolFunctionRegistryError>;

/// Port for the host's tool function registry.
///
/// Both mutating operations are idempotent: registering a name that
/// already exists replaces its entry, and unregistering an absent name is
/// a no-op. The boolean results report whether anything changed.
pub trait ToolFunctionRegistry: Send + Sync {
    /// Registers (or replaces) a function.
    ///
    /// Returns `true` when the name was newly registered.
    ///
    /// # Errors
    ///
    /// Returns [`ToolFunctionRegistryError`] when the definition is
    /// invalid or registry access fails.
    fn register(&self, function: RegisteredFunction) -> ToolFunctionRegistryResult<bool>;

    /// Unregisters a function by name.
    ///
    /// Returns `true` when an entry was removed.
    ///
    /// # Errors
    ///
    /// Returns [`ToolFunctionRegistryError`] when registry access fails.
    fn unregister(&self, function_name: &str) -> ToolFunctionRegistryResult<bool>;

    /// Finds a registered function by name.
    ///
    /// # Errors
    ///
    /// Returns [`ToolFunctionRegistryError`] when registry access fails.
    fn find_by_name(
        &self,
        function_name: &str,
    ) -> ToolFunctionRegistryResult<Option<RegisteredFunction>>;

    /// Lists registered functions in name order.
    ///
    /// # Errors
    ///
    /// Returns [`ToolFunctionRegistryError`] when registry access fails.
    fn list(&self) -> ToolFunctionRegistryResult<Vec<RegisteredFunction>>;
}

/// Errors for tool function registry operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ToolFunctionRegistryError {
    /// The function definition is invalid.
    #[error("invalid tool function definition: {0}")]
    InvalidDefinition(String),

    /// General registry access failure.
    #[error("tool function registry unavailable: {0}")]
    Unavailable(String),
}
