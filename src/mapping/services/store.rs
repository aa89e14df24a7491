//! Mapping store service: CRUD over command mappings and execution
//! settings, all load-modify-save against the configuration document.

use mockable::Clock;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use crate::bridge::domain::CaptureWindow;
use crate::mapping::domain::{
    MappingEntry, MappingStateFilter, PluginConfig, ResponseMode, normalize_entries,
    validate_mapping,
};
use crate::mapping::error::{ConfigStoreError, MappingError};
use crate::mapping::ports::store::{ConfigStore, LegacyMappingSource};

/// Request payload for adding a mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddMappingRequest {
    /// The command name, without any invocation prefix.
    pub command_name: String,
    /// The logical function identifier.
    pub llm_function: String,
    /// Human-readable description.
    pub description: String,
}

impl AddMappingRequest {
    /// Creates an add-mapping request.
    #[must_use]
    pub fn new(
        command_name: impl Into<String>,
        llm_function: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            command_name: command_name.into(),
            llm_function: llm_function.into(),
            description: description.into(),
        }
    }
}

/// What the one-time legacy migration did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationOutcome {
    /// Migration is switched off in the configuration.
    SkippedDisabled,
    /// Migration has already run.
    AlreadyDone,
    /// The configuration already holds mappings; nothing migrated.
    ConfigHasMappings,
    /// No usable legacy data was found.
    NoLegacyData,
    /// Legacy entries were migrated into the configuration.
    Migrated {
        /// How many entries were migrated.
        count: usize,
        /// Whether the legacy file was archived to `.bak`.
        archived: bool,
    },
}

/// Service exposing mapping CRUD and execution-setting accessors.
///
/// Every operation loads the document, applies its change, and saves, so
/// concurrent administrators see each other's writes at the store's
/// granularity.
#[derive(Clone)]
pub struct MappingStore<S>
where
    S: ConfigStore,
{
    store: Arc<S>,
}

impl<S> MappingStore<S>
where
    S: ConfigStore,
{
    /// Creates a mapping store over a configuration store.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Loads the full configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigStoreError`] when the store cannot be read.
    pub fn config(&self) -> Result<PluginConfig, ConfigStoreError> {
        self.store.load()
    }

    /// Returns whether the plugin is enabled.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigStoreError`] when the store cannot be read.
    pub fn is_plugin_enabled(&self) -> Result<bool, ConfigStoreError> {
        Ok(self.config()?.basic.enable_plugin)
    }

    /// Returns whether mapping changes should refresh registered
    /// functions.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigStoreError`] when the store cannot be read.
    pub fn auto_refresh_on_change(&self) -> Result<bool, ConfigStoreError> {
        Ok(self.config()?.basic.auto_refresh_on_change)
    }

    /// Returns the capture window derived from the stored timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigStoreError`] when the store cannot be read.
    pub fn capture_window(&self) -> Result<CaptureWindow, ConfigStoreError> {
        Ok(self.config()?.execution.capture_window())
    }

    /// Returns the pacing delay between forwarded messages.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigStoreError`] when the store cannot be read.
    pub fn forward_pacing(&self) -> Result<Duration, ConfigStoreError> {
        Ok(self.config()?.execution.forward_pacing())
    }

    /// Returns the configured response mode.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigStoreError`] when the store cannot be read.
    pub fn response_mode(&self) -> Result<ResponseMode, ConfigStoreError> {
        Ok(self.config()?.execution.response_mode)
    }

    /// Returns the usable wake prefixes.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigStoreError`] when the store cannot be read.
    pub fn wake_prefixes(&self) -> Result<Vec<String>, ConfigStoreError> {
        Ok(self.config()?.execution.usable_wake_prefixes())
    }

    /// Adds a mapping.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError`] when validation fails, the command already
    /// has a mapping, the function is taken while duplicates are
    /// disallowed, or persistence fails.
    pub fn add(
        &self,
        request: &AddMappingRequest,
        clock: &impl Clock,
    ) -> Result<MappingEntry, MappingError> {
        let mut config = self.store.load()?;
        validate_mapping(
            &request.command_name,
            &request.llm_function,
            config.basic.strict_validation,
        )?;

        let command_name = request.command_name.trim();
        let llm_function = request.llm_function.trim();

        if config
            .mappings
            .command_mappings
            .iter()
            .any(|entry| entry.command_name.trim() == command_name)
        {
            return Err(MappingError::DuplicateCommand(command_name.to_owned()));
        }

        if !config.mappings.allow_duplicate_llm_function
            && let Some(existing) = config
                .mappings
                .command_mappings
                .iter()
                .find(|entry| entry.llm_function.trim() == llm_function)
        {
            return Err(MappingError::DuplicateFunction {
                function: llm_function.to_owned(),
                command: existing.command_name.clone(),
            });
        }

        let entry = MappingEntry::new(
            command_name,
            llm_function,
            request.description.trim(),
            clock,
        );
        config.mappings.command_mappings.push(entry.clone());
        self.store.save(&config)?;
        tracing::info!(command = command_name, function = llm_function, "mapping added");
        Ok(entry)
    }

    /// Removes a mapping.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::NotFound`] when the command has no mapping,
    /// or a persistence error.
    pub fn remove(&self, command_name: &str) -> Result<(), MappingError> {
        let mut config = self.store.load()?;
        let trimmed = command_name.trim();
        let position = config
            .mappings
            .command_mappings
            .iter()
            .position(|entry| entry.command_name.trim() == trimmed)
            .ok_or_else(|| MappingError::NotFound(trimmed.to_owned()))?;

        config.mappings.command_mappings.remove(position);
        self.store.save(&config)?;
        tracing::info!(command = trimmed, "mapping removed");
        Ok(())
    }

    /// Enables or disables a mapping.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::NotFound`] when the command has no mapping,
    /// [`MappingError::AlreadyInState`] when nothing would change, or a
    /// persistence error.
    pub fn set_enabled(&self, command_name: &str, enabled: bool) -> Result<(), MappingError> {
        let mut config = self.store.load()?;
        let trimmed = command_name.trim();
        let entry = config
            .mappings
            .command_mappings
            .iter_mut()
            .find(|entry| entry.command_name.trim() == trimmed)
            .ok_or_else(|| MappingError::NotFound(trimmed.to_owned()))?;

        if entry.enabled == enabled {
            return Err(MappingError::AlreadyInState {
                command: trimmed.to_owned(),
                enabled,
            });
        }

        entry.enabled = enabled;
        self.store.save(&config)?;
        tracing::info!(command = trimmed, enabled, "mapping state changed");
        Ok(())
    }

    /// Looks up a mapping by command name.
    ///
    /// With `enabled_only`, a disabled mapping is reported as absent.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when the store cannot be read.
    pub fn get(
        &self,
        command_name: &str,
        enabled_only: bool,
    ) -> Result<Option<MappingEntry>, MappingError> {
        let config = self.store.load()?;
        let normalized = normalize_entries(config.mappings.command_mappings);
        Ok(normalized
            .get(command_name.trim())
            .filter(|entry| !enabled_only || entry.enabled)
            .cloned())
    }

    /// Lists mappings passing the filter, ordered by command name.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when the store cannot be read.
    pub fn list(
        &self,
        filter: MappingStateFilter,
    ) -> Result<BTreeMap<String, MappingEntry>, MappingError> {
        let config = self.store.load()?;
        let mut normalized = normalize_entries(config.mappings.command_mappings);
        normalized.retain(|_, entry| filter.matches(entry.enabled));
        Ok(normalized)
    }
}

impl<S> MappingStore<S>
where
    S: ConfigStore + LegacyMappingSource,
{
    /// Migrates the legacy standalone mapping file into the configuration
    /// document, at most once.
    ///
    /// The latch is set in every path that completes, so an unreadable or
    /// empty legacy file is not retried on the next start. Archive
    /// failures are logged and reported through the outcome, not raised.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when the configuration itself cannot be
    /// read or written.
    pub fn migrate_legacy_if_needed(
        &self,
        clock: &impl Clock,
    ) -> Result<MigrationOutcome, MappingError> {
        let mut config = self.store.load()?;
        if !config.compat.auto_migrate_legacy_json {
            return Ok(MigrationOutcome::SkippedDisabled);
        }
        if config.compat.migration_done {
            return Ok(MigrationOutcome::AlreadyDone);
        }
        if !config.mappings.command_mappings.is_empty() {
            config.compat.migration_done = true;
            self.store.save(&config)?;
            return Ok(MigrationOutcome::ConfigHasMappings);
        }

        let legacy = self.store.load_legacy().unwrap_or_else(|error| {
            tracing::warn!(%error, "legacy mapping file unreadable; skipping migration");
            None
        });

        let migrated = legacy.map_or(0, |entries| {
            let mut count = 0_usize;
            for (command_name, legacy_entry) in entries {
                let command = command_name.trim();
                let function = legacy_entry.llm_function.trim();
                if command.is_empty() || function.is_empty() {
                    continue;
                }
                config.mappings.command_mappings.push(MappingEntry {
                    enabled: true,
                    command_name: command.to_owned(),
                    llm_function: function.to_owned(),
                    description: legacy_entry.description.trim().to_owned(),
                    arg_description: String::new(),
                    group: "legacy".to_owned(),
                    aliases: Vec::new(),
                    created_at: Some(legacy_entry.created_at.unwrap_or_else(|| clock.utc())),
                });
                count += 1;
            }
            count
        });

        config.compat.migration_done = true;
        let keep_backup = config.compat.keep_legacy_backup;
        self.store.save(&config)?;

        if migrated == 0 {
            return Ok(MigrationOutcome::NoLegacyData);
        }

        let archived = keep_backup
            && self.store.archive_legacy().unwrap_or_else(|error| {
                tracing::warn!(%error, "failed to archive legacy mapping file");
                false
            });

        tracing::info!(count = migrated, archived, "migrated legacy command mappings");
        Ok(MigrationOutcome::Migrated {
            count: migrated,
            archived,
        })
    }
}
