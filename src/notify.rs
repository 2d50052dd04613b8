//! Load-notice collaborator.
//!
//! After a successful rebuild the session announces the new entry count
//! through this seam. A host UI can render it however it likes, say as a
//! transient overlay; the default implementation logs it. Purely cosmetic:
//! no return value, no effect on the engine.

/// Sink for data-loaded announcements.
pub trait LoadNotice: Send + Sync + std::fmt::Debug {
    /// Called after a successful trie rebuild.
    ///
    /// # Arguments
    ///
    /// * `entries` - Number of abbreviations now loaded.
    fn data_loaded(&self, entries: usize);
}

/// Default [`LoadNotice`] that announces loads through the tracing
/// framework.
#[derive(Debug, Default)]
pub struct TracingNotice;

impl LoadNotice for TracingNotice {
    fn data_loaded(&self, entries: usize) {
        tracing::info!(entries, "Abbreviation data loaded");
    }
}
