//! Remote cell-feed data source.
//!
//! The abbreviation mapping lives in a public spreadsheet exposed as a JSON
//! cell feed: a flat, ordered list of cell entries, each carrying its text
//! under the `$t` field. Entries 0 and 1 are a header/title pair and are
//! skipped; entries from index 2 on form consecutive abbreviation/expansion
//! pairs.
//!
//! Fetching is behind the [`CellSource`] trait so the session can be tested
//! without a network; [`HttpCellSource`] is the production implementation.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::source::SourceConfig;
use crate::error::source::SourceError;

/// Result type for cell-feed operations.
pub type SourceResult<T> = Result<T, SourceError>;

/// Number of leading cells that form the header/title pair.
const HEADER_CELLS: usize = 2;

/// An abbreviation/expansion pair as read from the feed, in feed order.
pub type AbbrevPair = (String, String);

/// Top-level shape of the cell feed response.
#[derive(Debug, Deserialize)]
pub struct CellFeed {
    feed: Feed,
}

#[derive(Debug, Deserialize)]
struct Feed {
    /// Absent entirely when the sheet has no populated cells.
    #[serde(default)]
    entry: Vec<Cell>,
}

#[derive(Debug, Deserialize)]
struct Cell {
    content: CellContent,
}

#[derive(Debug, Deserialize)]
struct CellContent {
    #[serde(rename = "$t")]
    text: String,
}

impl CellFeed {
    /// Decodes a feed from its JSON body.
    pub fn from_json(body: &str) -> SourceResult<Self> {
        Ok(serde_json::from_str(body)?)
    }

    /// Extracts the abbreviation pairs from the feed.
    ///
    /// The first two cells (header/title) are skipped; the rest must pair
    /// up. A feed with fewer than four cells or an odd cell count is
    /// malformed: the sheet cannot hold the header pair plus whole
    /// abbreviation rows.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<AbbrevPair>)` - The pairs in feed order.
    /// * `Err(SourceError::MalformedFeed)` - If the cell count is invalid.
    pub fn into_pairs(self) -> SourceResult<Vec<AbbrevPair>> {
        let entries = self.feed.entry;
        let count = entries.len();
        if count < HEADER_CELLS + 2 || count % 2 != 0 {
            return Err(SourceError::MalformedFeed { count });
        }

        let mut texts = entries
            .into_iter()
            .skip(HEADER_CELLS)
            .map(|cell| cell.content.text);

        let mut pairs = Vec::with_capacity((count - HEADER_CELLS) / 2);
        while let (Some(abbrev), Some(expansion)) = (texts.next(), texts.next()) {
            pairs.push((abbrev, expansion));
        }

        Ok(pairs)
    }
}

/// Provider of the abbreviation mapping for a sheet.
#[async_trait]
pub trait CellSource: Send + Sync {
    /// Fetches and decodes the mapping for `sheet_id`.
    ///
    /// # Arguments
    ///
    /// * `sheet_id` - The data-source identifier.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<AbbrevPair>)` - The pairs in feed order.
    /// * `Err(SourceError)` - On transport failure or a malformed feed.
    async fn fetch(&self, sheet_id: &str) -> SourceResult<Vec<AbbrevPair>>;
}

/// HTTP implementation of [`CellSource`] backed by a shared client.
#[derive(Debug, Clone)]
pub struct HttpCellSource {
    client: reqwest::Client,
    config: SourceConfig,
}

impl HttpCellSource {
    /// Creates a source for the configured feed URL template.
    ///
    /// # Arguments
    ///
    /// * `config` - The cell-feed source configuration.
    ///
    /// # Returns
    ///
    /// * `Ok(HttpCellSource)` - A source with a ready HTTP client.
    /// * `Err(SourceError)` - If the client cannot be constructed.
    pub fn new(config: SourceConfig) -> SourceResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl CellSource for HttpCellSource {
    async fn fetch(&self, sheet_id: &str) -> SourceResult<Vec<AbbrevPair>> {
        let url = self.config.feed_url(sheet_id);
        tracing::debug!(url = %url, "Fetching cell feed");

        let feed: CellFeed = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        feed.into_pairs()
    }
}
