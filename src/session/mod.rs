//! Expansion session.
//!
//! One session per editing context. It owns the state that would otherwise
//! end up as process-wide globals: the shared trie, the "accepting input"
//! flag, and the pending debounce timer. [`Session::activate`] (re)loads the
//! abbreviation data; [`Session::on_input`] is the debounced keystroke
//! entry point; [`Session::expand`] is the immediate, side-effect-free
//! variant used by the CLI and tests.
//!
//! All trie access goes through one `RwLock`: a rebuild holds the write
//! lock for the whole clear-and-reinsert, so a debounced attempt sees
//! either the fully-old or the fully-new trie, never a half-cleared one.
//! While a fetch is in flight the previous trie stays active.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::Duration;

use crate::config::expander::ExpanderConfig;
use crate::config::DebrevConfig;
use crate::engine::{plan_expansion, Replacement};
use crate::error::{report_error, DebrevResult, ErrorContext};
use crate::field::EditableField;
use crate::notify::{LoadNotice, TracingNotice};
use crate::source::{AbbrevPair, CellSource};
use crate::trie::AbbrevTrie;

/// An editable field shared with the debounced expansion task.
pub type SharedField = Arc<Mutex<dyn EditableField + Send>>;

/// A text-expansion session: data loading, input debouncing, and the
/// application of planned expansions to live fields.
pub struct Session {
    trie: Arc<RwLock<AbbrevTrie>>,
    source: Arc<dyn CellSource>,
    notice: Arc<dyn LoadNotice>,
    expander: ExpanderConfig,
    default_sheet_id: String,
    accepting_input: bool,
    pending: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("entries", &self.trie.read().len())
            .field("accepting_input", &self.accepting_input)
            .field("pending", &self.pending.is_some())
            .finish()
    }
}

impl Session {
    /// Creates a session over a cell source, with the default (logging)
    /// load notice.
    ///
    /// # Arguments
    ///
    /// * `config` - The engine configuration.
    /// * `source` - The abbreviation data source.
    pub fn new(config: &DebrevConfig, source: Arc<dyn CellSource>) -> Self {
        Self::with_notice(config, source, Arc::new(TracingNotice))
    }

    /// Creates a session with a custom load notice.
    ///
    /// # Arguments
    ///
    /// * `config` - The engine configuration.
    /// * `source` - The abbreviation data source.
    /// * `notice` - Sink for data-loaded announcements.
    pub fn with_notice(
        config: &DebrevConfig,
        source: Arc<dyn CellSource>,
        notice: Arc<dyn LoadNotice>,
    ) -> Self {
        Self {
            trie: Arc::new(RwLock::new(AbbrevTrie::new())),
            source,
            notice,
            expander: config.expander.clone(),
            default_sheet_id: config.source.default_sheet_id.clone(),
            accepting_input: false,
            pending: None,
        }
    }

    /// (Re)loads the abbreviation data and rebuilds the trie.
    ///
    /// The first call also starts accepting input events; calling again is
    /// the supported way to reload data without double-registering input
    /// handling.
    ///
    /// A malformed feed is not fatal: it is reported through the error
    /// reporter and treated as an empty mapping, which by default CLEARS
    /// the prior trie (the feed is authoritative even when invalid). With
    /// `expander.keep_stale_on_invalid` set, the prior trie is kept
    /// instead. A transport failure returns the error and leaves the trie
    /// in its prior state.
    ///
    /// # Arguments
    ///
    /// * `sheet_id` - Data-source identifier; the configured default when
    ///   `None`.
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - Number of abbreviations now loaded.
    /// * `Err(DebrevError)` - On transport failure.
    pub async fn activate(&mut self, sheet_id: Option<&str>) -> DebrevResult<usize> {
        self.accepting_input = true;

        let sheet_id = sheet_id.unwrap_or(&self.default_sheet_id);
        match self.source.fetch(sheet_id).await {
            Ok(pairs) => {
                let entries = pairs.len();
                self.rebuild(pairs);
                self.notice.data_loaded(entries);
                Ok(entries)
            }
            Err(e) if e.is_malformed() => {
                report_error(
                    ErrorContext::new(e.into(), "session")
                        .with_details(format!("sheet_id: {sheet_id}")),
                );
                if self.expander.keep_stale_on_invalid {
                    return Ok(self.trie.read().len());
                }
                self.rebuild(Vec::new());
                Ok(0)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Handles a qualifying input event on an editable field.
    ///
    /// Cancels any pending expansion attempt and schedules a new one after
    /// the configured quiet window, so only the last keystroke of a burst
    /// triggers an attempt and at most one attempt is ever pending. Inert
    /// before the first [`Session::activate`] call and when the event did
    /// not come from an editable field.
    ///
    /// # Arguments
    ///
    /// * `field` - The focused editable field, or `None` when the focused
    ///   element is not a recognized text control.
    pub fn on_input(&mut self, field: Option<SharedField>) {
        if !self.accepting_input {
            return;
        }
        let Some(field) = field else {
            return;
        };

        if let Some(pending) = self.pending.take() {
            pending.abort();
        }

        let trie = Arc::clone(&self.trie);
        let window = Duration::from_millis(self.expander.debounce_ms);
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(window).await;

            let mut field = field.lock();
            let planned = {
                let trie = trie.read();
                plan_expansion(&trie, &field.value(), field.selection_start())
            };
            if let Some(replacement) = planned {
                field.apply(&replacement);
            }
        }));
    }

    /// Plans an expansion against the current trie without side effects.
    ///
    /// # Arguments
    ///
    /// * `text` - The field text.
    /// * `cursor` - Cursor offset in grapheme clusters.
    pub fn expand(&self, text: &str, cursor: usize) -> Option<Replacement> {
        plan_expansion(&self.trie.read(), text, cursor)
    }

    /// Number of abbreviations currently loaded.
    pub fn entries(&self) -> usize {
        self.trie.read().len()
    }

    /// Rebuilds the trie wholesale under one write lock.
    fn rebuild(&self, pairs: Vec<AbbrevPair>) {
        let mut trie = self.trie.write();
        trie.clear();
        for (abbrev, expansion) in pairs {
            trie.insert(abbrev, expansion);
        }
    }
}
