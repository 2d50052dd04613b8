//! Expander configuration module.
//!
//! Settings for the input-driven expansion path: the debounce window, and
//! what a reload does to prior data when the feed turns out to be invalid.

use super::ConfigResult;
use super::Validate;
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Expander configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpanderConfig {
    /// Quiet period after an input event before an expansion attempt runs,
    /// in milliseconds. Each new input event within the window cancels the
    /// pending attempt and restarts the timer.
    pub debounce_ms: u64,

    /// When the feed is malformed, keep the last-known-good trie instead of
    /// clearing it. Off by default: the feed is treated as authoritative
    /// even when invalid, so a bad reload blanks out all expansions.
    pub keep_stale_on_invalid: bool,
}

impl Default for ExpanderConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 500,
            keep_stale_on_invalid: false,
        }
    }
}

impl Validate for ExpanderConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.debounce_ms == 0 {
            return Err(ConfigError::ValidationError(
                "debounce_ms must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
