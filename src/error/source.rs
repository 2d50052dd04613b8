//! Cell-feed error module.
//!
//! Error types for fetching and decoding the remote cell feed.

use thiserror::Error;

/// Errors that can occur while fetching or decoding the cell feed.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The feed's cell list cannot hold a header pair plus at least one
    /// abbreviation pair, or pairs up unevenly.
    #[error("Malformed cell feed: {count} entries (expected an even count of at least 4)")]
    MalformedFeed {
        /// Number of cell entries the feed carried.
        count: usize,
    },

    /// The HTTP request failed or returned a non-success status.
    #[error("Cell feed request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body was not the expected JSON shape.
    #[error("Failed to decode cell feed: {0}")]
    Decode(#[from] serde_json::Error),
}

impl SourceError {
    /// Whether this error means the feed itself is malformed, as opposed to
    /// a transport failure. Malformed feeds are authoritative (the session
    /// treats them as an empty mapping); transport failures leave the prior
    /// trie in place.
    pub fn is_malformed(&self) -> bool {
        matches!(self, SourceError::MalformedFeed { .. })
    }
}
