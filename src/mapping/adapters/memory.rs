//! In-memory configuration store adapter.

use std::sync::{Arc, RwLock};

use crate::mapping::domain::{LegacyMappings, PluginConfig};
use crate::mapping::error::ConfigStoreError;
use crate::mapping::ports::store::{ConfigStore, ConfigStoreResult, LegacyMappingSource};

/// Thread-safe in-memory configuration store.
///
/// Holds the document and an optional legacy mapping file, which makes it
/// the test double for both persistence ports.
#[derive(Debug, Clone, Default)]
pub struct InMemoryConfigStore {
    state: Arc<RwLock<InMemoryConfigState>>,
}

#[derive(Debug, Default)]
struct InMemoryConfigState {
    config: PluginConfig,
    legacy: Option<LegacyMappings>,
    archived: Option<LegacyMappings>,
}

impl InMemoryConfigStore {
    /// Creates a store holding the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the given configuration.
    #[must_use]
    pub fn with_config(config: PluginConfig) -> Self {
        let store = Self::default();
        {
            let mut state = store
                .state
                .write()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            state.config = config;
        }
        store
    }

    /// Seeds a legacy mapping file.
    #[must_use]
    pub fn with_legacy(self, legacy: LegacyMappings) -> Self {
        {
            let mut state = self
                .state
                .write()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            state.legacy = Some(legacy);
        }
        self
    }

    /// Returns the archived legacy mappings, if the file was archived.
    #[must_use]
    pub fn archived_legacy(&self) -> Option<LegacyMappings> {
        self.state
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .archived
            .clone()
    }
}

fn poisoned(err: impl std::fmt::Display) -> ConfigStoreError {
    ConfigStoreError::io(std::io::Error::other(err.to_string()))
}

impl ConfigStore for InMemoryConfigStore {
    fn load(&self) -> ConfigStoreResult<PluginConfig> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.config.clone())
    }

    fn save(&self, config: &PluginConfig) -> ConfigStoreResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.config = config.clone();
        Ok(())
    }
}

impl LegacyMappingSource for InMemoryConfigStore {
    fn load_legacy(&self) -> ConfigStoreResult<Option<LegacyMappings>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.legacy.clone())
    }

    fn archive_legacy(&self) -> ConfigStoreResult<bool> {
        let mut state = self.state.write().map_err(poisoned)?;
        match state.legacy.take() {
            Some(legacy) => {
                state.archived = Some(legacy);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
