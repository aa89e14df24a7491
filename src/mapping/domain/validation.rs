//! Mapping validation rules.

use thiserror::Error;

/// Errors produced by mapping validation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MappingValidationError {
    /// The command name is blank.
    #[error("command name must not be empty")]
    EmptyCommandName,

    /// The command name contains a control character.
    #[error("command name must not contain control characters")]
    CommandNameControlCharacter,

    /// The function identifier is blank.
    #[error("function name must not be empty")]
    EmptyFunctionName,

    /// Strict validation rejected the function identifier.
    #[error("function name '{0}' may only contain letters, digits, and underscores")]
    InvalidFunctionName(String),
}

/// Validates a command name / function pair.
///
/// Command names may contain spaces (multi-level commands) but no control
/// characters. Under strict validation the function identifier is limited
/// to ASCII letters, digits, and underscores.
///
/// # Errors
///
/// Returns [`MappingValidationError`] describing the first violated rule.
pub fn validate_mapping(
    command_name: &str,
    llm_function: &str,
    strict: bool,
) -> Result<(), MappingValidationError> {
    let command = command_name.trim();
    if command.is_empty() {
        return Err(MappingValidationError::EmptyCommandName);
    }
    if command.chars().any(char::is_control) {
        return Err(MappingValidationError::CommandNameControlCharacter);
    }

    let function = llm_function.trim();
    if function.is_empty() {
        return Err(MappingValidationError::EmptyFunctionName);
    }
    if strict && !is_function_identifier(function) {
        return Err(MappingValidationError::InvalidFunctionName(
            function.to_owned(),
        ));
    }

    Ok(())
}

fn is_function_identifier(value: &str) -> bool {
    value
        .chars()
        .all(|character| character.is_ascii_alphanumeric() || character == '_')
}
