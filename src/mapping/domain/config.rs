//! Typed plugin configuration sections.
//!
//! Every field carries a serde default so a partial or hand-edited
//! document still loads; accessors derive runtime values (capture window,
//! pacing) from the stored integers.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::MappingEntry;
use crate::bridge::domain::CaptureWindow;

const fn default_true() -> bool {
    true
}

const fn default_capture_timeout_secs() -> u64 {
    20
}

const fn default_forward_interval_millis() -> u64 {
    500
}

fn default_wake_prefixes() -> Vec<String> {
    vec!["/".to_owned()]
}

fn default_tool_description() -> String {
    "Maps existing commands to callable functions so an assistant can trigger them.".to_owned()
}

fn default_arg_description() -> String {
    "Argument string for the command. Prefer key=value pairs separated by spaces, \
     e.g. text=water time=10:00."
        .to_owned()
}

/// How the processor reports captured output back to its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseMode {
    /// Forward to the conversation and return the captured text.
    ForwardAndText,
    /// Return the captured text only.
    TextOnly,
    /// Forward to the conversation and return a short confirmation.
    #[default]
    ForwardOnly,
}

impl ResponseMode {
    /// Returns `true` when captured output is forwarded to the
    /// conversation.
    #[must_use]
    pub const fn is_forwarding(self) -> bool {
        matches!(self, Self::ForwardAndText | Self::ForwardOnly)
    }
}

/// Plugin-wide switches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicConfig {
    /// Master switch; when off, execution and administration refuse.
    #[serde(default = "default_true")]
    pub enable_plugin: bool,
    /// Refresh registered functions whenever mappings change.
    #[serde(default = "default_true")]
    pub auto_refresh_on_change: bool,
    /// Restrict function names to `[A-Za-z0-9_]`.
    #[serde(default)]
    pub strict_validation: bool,
}

impl Default for BasicConfig {
    fn default() -> Self {
        Self {
            enable_plugin: true,
            auto_refresh_on_change: true,
            strict_validation: false,
        }
    }
}

/// Stored command mappings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingConfig {
    /// The mapping entries in configuration order.
    #[serde(default)]
    pub command_mappings: Vec<MappingEntry>,
    /// Allow two commands to map to the same function.
    #[serde(default = "default_true")]
    pub allow_duplicate_llm_function: bool,
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            command_mappings: Vec::new(),
            allow_duplicate_llm_function: true,
        }
    }
}

/// Capture and forwarding settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionConfig {
    /// Maximum capture wait in whole seconds.
    #[serde(default = "default_capture_timeout_secs")]
    pub capture_timeout_secs: u64,
    /// Pacing between forwarded messages in milliseconds.
    #[serde(default = "default_forward_interval_millis")]
    pub forward_interval_millis: u64,
    /// How captured output is reported.
    #[serde(default)]
    pub response_mode: ResponseMode,
    /// Invocation prefixes the host framework wakes on.
    #[serde(default = "default_wake_prefixes")]
    pub wake_prefixes: Vec<String>,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            capture_timeout_secs: default_capture_timeout_secs(),
            forward_interval_millis: default_forward_interval_millis(),
            response_mode: ResponseMode::default(),
            wake_prefixes: default_wake_prefixes(),
        }
    }
}

impl ExecutionConfig {
    /// Derives the capture window from the stored timeout.
    ///
    /// The poll interval scales with the timeout (one two-hundredth of it)
    /// and is kept within [50 ms, 500 ms]; [`CaptureWindow::new`] applies
    /// the global minima on top.
    #[must_use]
    pub fn capture_window(&self) -> CaptureWindow {
        let max_wait = Duration::from_secs(self.capture_timeout_secs);
        let poll_interval =
            (max_wait / 200).clamp(Duration::from_millis(50), Duration::from_millis(500));
        CaptureWindow::new(max_wait, poll_interval)
    }

    /// Returns the pacing delay between forwarded messages.
    #[must_use]
    pub const fn forward_pacing(&self) -> Duration {
        Duration::from_millis(self.forward_interval_millis)
    }

    /// Returns the usable wake prefixes, falling back to `/` when the
    /// configured list is empty or blank.
    #[must_use]
    pub fn usable_wake_prefixes(&self) -> Vec<String> {
        let prefixes: Vec<String> = self
            .wake_prefixes
            .iter()
            .filter(|prefix| !prefix.is_empty())
            .cloned()
            .collect();
        if prefixes.is_empty() {
            default_wake_prefixes()
        } else {
            prefixes
        }
    }
}

/// Legacy-migration switches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompatConfig {
    /// Migrate the standalone legacy JSON file on first use.
    #[serde(default = "default_true")]
    pub auto_migrate_legacy_json: bool,
    /// Rename the legacy file to `.bak` after migrating.
    #[serde(default = "default_true")]
    pub keep_legacy_backup: bool,
    /// Latched once migration has run (or was found unnecessary).
    #[serde(default)]
    pub migration_done: bool,
}

impl Default for CompatConfig {
    fn default() -> Self {
        Self {
            auto_migrate_legacy_json: true,
            keep_legacy_backup: true,
            migration_done: false,
        }
    }
}

/// Descriptions attached to registered functions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Appended to every registered function's description.
    #[serde(default = "default_tool_description")]
    pub tool_description: String,
    /// Default description of the `args` parameter.
    #[serde(default = "default_arg_description")]
    pub arg_description: String,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            tool_description: default_tool_description(),
            arg_description: default_arg_description(),
        }
    }
}

/// The persisted plugin configuration document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginConfig {
    /// Plugin-wide switches.
    pub basic: BasicConfig,
    /// Stored command mappings.
    pub mappings: MappingConfig,
    /// Capture and forwarding settings.
    pub execution: ExecutionConfig,
    /// Legacy-migration switches.
    pub compat: CompatConfig,
    /// Registered-function descriptions.
    pub tool: ToolConfig,
}
