//! Command invocation and response capture bridge.
//!
//! This module implements the core of Maillart: synthesizing an inbound
//! command event, diverting its outbound channel into a capture buffer,
//! submitting it to the host's event queue, and waiting for the opaque
//! pipeline to answer.
//!
//! # Architecture
//!
//! The module follows hexagonal architecture principles:
//!
//! - **Domain**: Pure domain types ([`domain::CommandEvent`],
//!   [`domain::OutboundMessage`], [`domain::InvocationOutcome`], etc.)
//! - **Ports**: Abstract trait interfaces ([`ports::event_queue::EventQueue`],
//!   [`ports::outbound::OutboundSender`],
//!   [`ports::outbound::ConversationGateway`])
//! - **Adapters**: Concrete implementations
//!   ([`adapters::memory::InMemoryEventQueue`],
//!   [`adapters::memory::RecordingConversationGateway`])
//! - **Services**: The capture orchestration
//!   ([`services::CommandTrigger`], [`services::CommandExecutor`],
//!   [`services::ResponseForwarder`])
//!
//! # Example
//!
//! ```
//! use maillart::bridge::domain::CaptureWindow;
//! use std::time::Duration;
//!
//! // Degenerate configuration is clamped to the enforced minima.
//! let window = CaptureWindow::new(Duration::ZERO, Duration::ZERO);
//! assert_eq!(window.max_wait(), CaptureWindow::MIN_WAIT);
//! assert_eq!(window.poll_interval(), CaptureWindow::MIN_POLL_INTERVAL);
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
