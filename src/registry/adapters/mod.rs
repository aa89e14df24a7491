//! Adapter implementations of the registry port.

pub mod memory;
