//! Mapping state filter.

use serde::{Deserialize, Serialize};

/// Filter applied when listing mappings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MappingStateFilter {
    /// All mappings regardless of state.
    #[default]
    All,
    /// Enabled mappings only.
    Enabled,
    /// Disabled mappings only.
    Disabled,
}

impl MappingStateFilter {
    /// Parses a user-supplied filter token.
    ///
    /// Accepts `all`, `enabled`, and `disabled`, case-insensitively and
    /// with or without a leading `--`. Returns `None` for anything else.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let token = raw.trim().trim_start_matches("--").to_ascii_lowercase();
        match token.as_str() {
            "" | "all" => Some(Self::All),
            "enabled" => Some(Self::Enabled),
            "disabled" => Some(Self::Disabled),
            _ => None,
        }
    }

    /// Returns `true` when an entry with the given state passes the
    /// filter.
    #[must_use]
    pub const fn matches(self, enabled: bool) -> bool {
        match self {
            Self::All => true,
            Self::Enabled => enabled,
            Self::Disabled => !enabled,
        }
    }
}
