//! Legacy standalone mapping file model.
//!
//! Earlier releases persisted mappings in their own JSON file keyed by
//! command name. The store migrates that file into the configuration
//! document exactly once.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The legacy file: command name → entry.
pub type LegacyMappings = BTreeMap<String, LegacyMappingEntry>;

/// One entry of the legacy mapping file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyMappingEntry {
    /// The logical function identifier.
    pub llm_function: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// Original creation time, when the file recorded one.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}
