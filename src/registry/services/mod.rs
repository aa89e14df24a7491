//! Registry services.

pub mod sync;

pub use sync::{FunctionSync, FunctionSyncError};
