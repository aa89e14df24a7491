//! Adapter implementations of the mapping ports.

pub mod fs;
pub mod memory;
