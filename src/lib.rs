//! Debrev engine library.
//!
//! This library contains the core components of the debrev text-expansion
//! engine: the reversed-abbreviation trie and its traversal cursor, the
//! pure expansion planner, the remote cell-feed source, and the session
//! that ties them to live editable fields. The library is designed to be
//! used by the binary crate, but can also be embedded by a host UI.
//!
//! # Architecture
//!
//! The engine is designed with the following principles in mind:
//! - The matching decision is pure: text plus cursor offset in, optional
//!   replacement out, no UI in sight
//! - Collaborators (data source, load notice, editable fields) sit behind
//!   traits for testability
//! - One trie snapshot per session, rebuilt wholesale on reload, never
//!   patched incrementally
//! - Grapheme clusters are the unit of reversal and traversal throughout

// Re-export public modules
pub mod config;
pub mod engine;
pub mod error;
pub mod field;
pub mod notify;
pub mod session;
pub mod source;
pub mod trie;

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;

/// Version information for the debrev engine.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library initialization function
pub fn init() -> error::DebrevResult<()> {
    // Set up global error reporter with tracing
    error::set_error_reporter(std::sync::Arc::new(error::TracingErrorReporter));

    // Initialize default configuration
    config::init_default_config()?;

    Ok(())
}
