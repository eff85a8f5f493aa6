//! `[watch]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [watch]
//! enabled = true      # Create filesystem watchers for the search roots
//! interval_ms = 100   # Tick interval of `hotshade watch`
//! ```
//!
//! With `enabled = false` only inline sources trigger rebuilds.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Change detection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Watch the search roots for file changes.
    pub enabled: bool,

    /// Milliseconds between two ticks in `hotshade watch`.
    pub interval_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_ms: 100,
        }
    }
}

impl WatchConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::config::test_parse_config;

    #[test]
    fn test_watch_config() {
        let config = test_parse_config("[watch]\nenabled = false\ninterval_ms = 16");
        assert!(!config.watch.enabled);
        assert_eq!(config.watch.interval(), Duration::from_millis(16));
    }

    #[test]
    fn test_watch_config_defaults() {
        let config = test_parse_config("");
        assert!(config.watch.enabled);
        assert_eq!(config.watch.interval_ms, 100);
    }
}
