//! Mapping entry model and normalisation.

use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const fn default_true() -> bool {
    true
}

fn default_group() -> String {
    "default".to_owned()
}

/// One command → function mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingEntry {
    /// Whether the mapping participates in execution and registration.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// The command name, without any invocation prefix. May contain
    /// spaces for multi-level commands (`remind ls`).
    pub command_name: String,
    /// The logical function identifier the command maps to.
    pub llm_function: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// Mapping-specific description of the `args` parameter; falls back
    /// to the global default when blank.
    #[serde(default)]
    pub arg_description: String,
    /// Grouping label.
    #[serde(default = "default_group")]
    pub group: String,
    /// Alternate command spellings.
    #[serde(default)]
    pub aliases: Vec<String>,
    /// When the mapping was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl MappingEntry {
    /// Creates an enabled mapping in the default group, stamped with the
    /// clock's current time.
    #[must_use]
    pub fn new(
        command_name: impl Into<String>,
        llm_function: impl Into<String>,
        description: impl Into<String>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            enabled: true,
            command_name: command_name.into(),
            llm_function: llm_function.into(),
            description: description.into(),
            arg_description: String::new(),
            group: default_group(),
            aliases: Vec::new(),
            created_at: Some(clock.utc()),
        }
    }
}

/// Normalises raw entries into a name-ordered map.
///
/// Trims names and descriptions, drops entries missing a command name or
/// function, drops blank aliases, and restores the default group label
/// when blank. Later entries for the same command name win, matching the
/// original map semantics.
#[must_use]
pub fn normalize_entries(entries: Vec<MappingEntry>) -> BTreeMap<String, MappingEntry> {
    let mut normalized = BTreeMap::new();
    for entry in entries {
        let command_name = entry.command_name.trim().to_owned();
        let llm_function = entry.llm_function.trim().to_owned();
        if command_name.is_empty() || llm_function.is_empty() {
            continue;
        }

        let group = entry.group.trim();
        let cleaned = MappingEntry {
            enabled: entry.enabled,
            command_name: command_name.clone(),
            llm_function,
            description: entry.description.trim().to_owned(),
            arg_description: entry.arg_description.trim().to_owned(),
            group: if group.is_empty() {
                default_group()
            } else {
                group.to_owned()
            },
            aliases: entry
                .aliases
                .iter()
                .map(|alias| alias.trim().to_owned())
                .filter(|alias| !alias.is_empty())
                .collect(),
            created_at: entry.created_at,
        };
        normalized.insert(command_name, cleaned);
    }
    normalized
}
