//! Command mapping store.
//!
//! Maps command names to logical function identifiers through a persisted
//! plugin configuration document. Covers the typed configuration sections,
//! CRUD over mappings, execution-setting accessors, and the one-time
//! migration of the legacy standalone mapping file.
//!
//! # Architecture
//!
//! - **Domain**: [`domain::PluginConfig`], [`domain::MappingEntry`],
//!   validation rules, and the legacy file model
//! - **Ports**: [`ports::store::ConfigStore`],
//!   [`ports::store::LegacyMappingSource`]
//! - **Adapters**: [`adapters::memory::InMemoryConfigStore`],
//!   [`adapters::fs::DirectoryConfigStore`]
//! - **Services**: [`services::MappingStore`]

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
