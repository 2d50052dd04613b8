//! Cell-feed source configuration module.
//!
//! This module defines configuration for the remote tabular data source the
//! abbreviation mapping is fetched from.

use super::ConfigResult;
use super::Validate;
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Placeholder substituted with the sheet identifier in the URL template.
pub const SHEET_ID_PLACEHOLDER: &str = "{sheet_id}";

/// Sheet identifier used when activation is given none.
pub const DEFAULT_SHEET_ID: &str = "0AvVUeLrnS9nwdGJQRV9vdUhYTWd5cWlUT1NPRllTdUE";

/// Default cell-feed URL template (public spreadsheet cells, JSON).
const DEFAULT_URL_TEMPLATE: &str =
    "https://spreadsheets.google.com/feeds/cells/{sheet_id}/1/public/values?alt=json";

/// Cell-feed source configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// URL template for the cell feed; must contain `{sheet_id}`.
    pub url_template: String,

    /// Sheet identifier used when the caller does not supply one.
    pub default_sheet_id: String,

    /// Request timeout in milliseconds.
    pub request_timeout_ms: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url_template: DEFAULT_URL_TEMPLATE.to_string(),
            default_sheet_id: DEFAULT_SHEET_ID.to_string(),
            request_timeout_ms: 10_000,
        }
    }
}

impl SourceConfig {
    /// Resolves the feed URL for a sheet identifier.
    pub fn feed_url(&self, sheet_id: &str) -> String {
        self.url_template.replace(SHEET_ID_PLACEHOLDER, sheet_id)
    }
}

impl Validate for SourceConfig {
    fn validate(&self) -> ConfigResult<()> {
        if !self.url_template.contains(SHEET_ID_PLACEHOLDER) {
            return Err(ConfigError::ValidationError(format!(
                "url_template must contain the {SHEET_ID_PLACEHOLDER} placeholder"
            )));
        }

        if self.default_sheet_id.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "default_sheet_id cannot be empty".to_string(),
            ));
        }

        if self.request_timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "request_timeout_ms must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
