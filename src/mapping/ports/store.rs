//! Configuration persistence ports.

use crate::mapping::domain::{LegacyMappings, PluginConfig};
use crate::mapping::error::ConfigStoreError;

/// Result type for configuration store operations.
pub type ConfigStoreResult<T> = Result<T, ConfigStoreError>;

/// Port for loading and saving the plugin configuration document.
///
/// Implementations must return a default document when none has been
/// persisted yet, so first use never fails.
pub trait ConfigStore: Send + Sync {
    /// Loads the current configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigStoreError`] when the backing store is unreadable
    /// or the document is malformed.
    fn load(&self) -> ConfigStoreResult<PluginConfig>;

    /// Persists the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigStoreError`] when the document cannot be written.
    fn save(&self, config: &PluginConfig) -> ConfigStoreResult<()>;
}

/// Port for the legacy standalone mapping file.
pub trait LegacyMappingSource: Send + Sync {
    /// Loads the legacy mapping file, if one exists.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigStoreError`] when the file exists but cannot be
    /// read or parsed.
    fn load_legacy(&self) -> ConfigStoreResult<Option<LegacyMappings>>;

    /// Archives the legacy file so it is not migrated twice.
    ///
    /// Returns `true` when a file was archived.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigStoreError`] when the archive operation fails.
    fn archive_legacy(&self) -> ConfigStoreResult<bool>;
}
