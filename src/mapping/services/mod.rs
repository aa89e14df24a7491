//! Mapping store services.

pub mod store;

pub use store::{AddMappingRequest, MappingStore, MigrationOutcome};
