//! Command processor: the application façade over the bridge, the mapping
//! store, and the function registry.
//!
//! The processor resolves a mapped command, builds the fully prefixed
//! command text, runs it through the executor with configuration-derived
//! settings, applies the configured response mode, and returns plain
//! status text suitable for surfacing to a user or an LLM. It also hosts
//! the mapping administration operations.

mod prefix;
mod service;

pub use prefix::resolve_full_command;
pub use service::{CommandOrigin, CommandProcessor};
