//! Outline engine configuration
//!
//! Explicitly owned configuration, constructed by the host at activation
//! and handed to the coordinator. Hosts embedding codetree in a larger
//! config file can deserialize this section with serde/toml directly.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::infra::RetryConfig;

/// Preference and host context-flag keys.
pub mod keys {
    pub const CURSOR_TRACKING_ENABLED: &str = "codeTree.cursorTrackingEnabled";
    pub const SHOW_VARIABLES: &str = "codeTree.showVariables";
    pub const SHOW_FUNCTION: &str = "codeTree.showFunction";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutlineConfig {
    /// Quiet period after the last edit before the cache is invalidated
    /// and the tree refreshed.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Attempt budget while the symbol provider reports not-ready.
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,

    /// Fixed delay between retry attempts.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

fn default_debounce_ms() -> u64 {
    500
}

fn default_retry_attempts() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    1000
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            retry_attempts: default_retry_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl OutlineConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn retry(&self) -> RetryConfig {
        RetryConfig {
            max_attempts: self.retry_attempts.max(1),
            delay: Duration::from_millis(self.retry_delay_ms),
        }
    }
}
