//! Capability-scoped filesystem configuration store adapter.
//!
//! Persists the configuration as one JSON document inside a directory the
//! embedder has opened as a capability. The legacy standalone mapping file
//! lives in the same directory and is renamed to `.bak` when archived.

use cap_std::fs_utf8::Dir;

use crate::mapping::domain::{LegacyMappings, PluginConfig};
use crate::mapping::error::ConfigStoreError;
use crate::mapping::ports::store::{ConfigStore, ConfigStoreResult, LegacyMappingSource};

const CONFIG_FILE: &str = "config.json";
const LEGACY_FILE: &str = "command_mappings.json";
const LEGACY_BACKUP: &str = "command_mappings.json.bak";

/// Configuration store over a capability-scoped directory.
#[derive(Debug)]
pub struct DirectoryConfigStore {
    dir: Dir,
}

impl DirectoryConfigStore {
    /// Creates a store persisting inside the given directory capability.
    #[must_use]
    pub const fn new(dir: Dir) -> Self {
        Self { dir }
    }
}

impl ConfigStore for DirectoryConfigStore {
    fn load(&self) -> ConfigStoreResult<PluginConfig> {
        if !self.dir.exists(CONFIG_FILE) {
            return Ok(PluginConfig::default());
        }
        let raw = self
            .dir
            .read_to_string(CONFIG_FILE)
            .map_err(ConfigStoreError::io)?;
        serde_json::from_str(&raw).map_err(|err| ConfigStoreError::serialisation(err.to_string()))
    }

    fn save(&self, config: &PluginConfig) -> ConfigStoreResult<()> {
        let raw = serde_json::to_string_pretty(config)
            .map_err(|err| ConfigStoreError::serialisation(err.to_string()))?;
        self.dir
            .write(CONFIG_FILE, raw)
            .map_err(ConfigStoreError::io)
    }
}

impl LegacyMappingSource for DirectoryConfigStore {
    fn load_legacy(&self) -> ConfigStoreResult<Option<LegacyMappings>> {
        if !self.dir.exists(LEGACY_FILE) {
            return Ok(None);
        }
        let raw = self
            .dir
            .read_to_string(LEGACY_FILE)
            .map_err(ConfigStoreError::io)?;
        let mappings = serde_json::from_str(&raw)
            .map_err(|err| ConfigStoreError::serialisation(err.to_string()))?;
        Ok(Some(mappings))
    }

    fn archive_legacy(&self) -> ConfigStoreResult<bool> {
        if !self.dir.exists(LEGACY_FILE) {
            return Ok(false);
        }
        self.dir
            .rename(LEGACY_FILE, &self.dir, LEGACY_BACKUP)
            .map_err(ConfigStoreError::io)?;
        Ok(true)
    }
}
