//! Tool function registry.
//!
//! Exposes mapped commands as callable functions for an LLM provider. The
//! registry is an explicit object handed to the components that need it,
//! with an idempotent register/unregister contract and no ambient global
//! state.
//!
//! # Architecture
//!
//! - **Domain**: [`domain::ToolFunctionDefinition`],
//!   [`domain::ToolParameterSpec`], [`domain::CommandBinding`]
//! - **Ports**: [`ports::ToolFunctionRegistry`]
//! - **Adapters**: [`adapters::memory::InMemoryToolFunctionRegistry`]
//! - **Services**: [`services::FunctionSync`], projecting enabled mappings
//!   into registered functions

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
