//! Error types for the mapping store.

use std::sync::Arc;
use thiserror::Error;

use super::domain::MappingValidationError;

/// Errors from configuration persistence.
#[derive(Debug, Clone, Error)]
pub enum ConfigStoreError {
    /// Reading or writing the configuration failed.
    #[error("configuration I/O failed: {0}")]
    Io(Arc<dyn std::error::Error + Send + Sync>),

    /// The configuration document could not be encoded or decoded.
    #[error("configuration serialisation failed: {0}")]
    Serialisation(String),
}

impl ConfigStoreError {
    /// Creates an I/O error from any error type.
    #[must_use]
    pub fn io(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Io(Arc::new(err))
    }

    /// Creates a serialisation error.
    #[must_use]
    pub fn serialisation(message: impl Into<String>) -> Self {
        Self::Serialisation(message.into())
    }
}

const fn state_name(enabled: &bool) -> &'static str {
    if *enabled { "enabled" } else { "disabled" }
}

/// Errors from mapping store operations.
#[derive(Debug, Clone, Error)]
pub enum MappingError {
    /// The mapping failed validation.
    #[error(transparent)]
    Validation(#[from] MappingValidationError),

    /// The command already has a mapping.
    #[error("command '{0}' already has a mapping")]
    DuplicateCommand(String),

    /// The function is already used by another command and duplicates are
    /// disallowed.
    #[error("function '{function}' is already used by command '{command}'")]
    DuplicateFunction {
        /// The contested function identifier.
        function: String,
        /// The command already holding it.
        command: String,
    },

    /// No mapping exists for the command.
    #[error("command '{0}' has no mapping")]
    NotFound(String),

    /// The mapping is already in the requested state.
    #[error("command '{command}' is already {}", state_name(.enabled))]
    AlreadyInState {
        /// The command whose state was unchanged.
        command: String,
        /// The state that was requested.
        enabled: bool,
    },

    /// Configuration persistence failed.
    #[error(transparent)]
    Store(#[from] ConfigStoreError),
}
