//! Capture window configuration for the dispatch and wait loop.

use std::time::Duration;

/// Bounded wait configuration for one invocation.
///
/// Construction clamps both values to enforced minima so degenerate
/// zero or near-zero configuration can neither busy-loop nor produce an
/// instantaneous false timeout. Clamping is idempotent: re-clamping an
/// already clamped window changes nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureWindow {
    max_wait: Duration,
    poll_interval: Duration,
}

impl CaptureWindow {
    /// Smallest accepted total wait.
    pub const MIN_WAIT: Duration = Duration::from_secs(1);

    /// Smallest accepted poll interval.
    pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(50);

    /// Default total wait.
    pub const DEFAULT_MAX_WAIT: Duration = Duration::from_secs(20);

    /// Default poll interval.
    pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

    /// Creates a window, clamping both values to the enforced minima.
    #[must_use]
    pub fn new(max_wait: Duration, poll_interval: Duration) -> Self {
        Self {
            max_wait: max_wait.max(Self::MIN_WAIT),
            poll_interval: poll_interval.max(Self::MIN_POLL_INTERVAL),
        }
    }

    /// Returns the maximum total wait.
    #[must_use]
    pub const fn max_wait(&self) -> Duration {
        self.max_wait
    }

    /// Returns the poll interval.
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        self.poll_interval
    }
}

impl Default for CaptureWindow {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_WAIT, Self::DEFAULT_POLL_INTERVAL)
    }
}
