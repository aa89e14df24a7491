//! Adapter implementations of the bridge ports.

pub mod memory;
