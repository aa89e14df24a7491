//! Maillart: command invocation and response capture bridge.
//!
//! This crate lets an automated caller (typically an LLM-driven tool
//! call) invoke a chat command that is normally only reachable through a
//! live user message, and receive the command's output synchronously. The
//! host's command pipeline is opaque: it consumes inbound events from a
//! queue and emits responses through a one-way send with no completion
//! signal. Maillart synthesizes an inbound event, diverts its outbound
//! channel into a capture buffer, submits it to the host's own queue,
//! polls until the buffer fills or a deadline passes, and then returns or
//! forwards the captured batch.
//!
//! # Architecture
//!
//! Maillart follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory,
//!   capability-scoped filesystem)
//!
//! # Modules
//!
//! - [`bridge`]: Synthetic events, response interception, and the
//!   dispatch and wait loop
//! - [`mapping`]: Command-to-function mapping store with legacy migration
//! - [`registry`]: Tool function registry exposed to an LLM provider
//! - [`processor`]: Application façade tying the three together

pub mod bridge;
pub mod mapping;
pub mod processor;
pub mod registry;
