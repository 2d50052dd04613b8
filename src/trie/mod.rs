//! Abbreviation trie.
//!
//! Stores each abbreviation **reversed and lowercased**, one grapheme
//! cluster per edge, with the expansion text on the terminal node. Storing
//! keys reversed is what makes suffix matching incremental: the expansion
//! planner reads the field right-to-left from the typing cursor and feeds
//! each grapheme to a [`TrieCursor`], so a keystroke costs one edge lookup
//! instead of a fresh scan.
//!
//! Graphemes, not code units, are the traversal unit: reversing a string by
//! raw code unit corrupts multi-byte text, so edges are keyed by lowercased
//! grapheme cluster throughout.

mod cursor;
mod node;

use unicode_segmentation::UnicodeSegmentation;

pub use cursor::{Advance, TrieCursor};
use node::TrieNode;

/// Trie of reversed abbreviations mapping to their expansions.
///
/// The lifecycle is rebuild-wholesale: a data reload does `clear` followed
/// by a full set of `insert`s, never an incremental patch. There is no
/// single-entry removal.
#[derive(Debug, Clone, Default)]
pub struct AbbrevTrie {
    root: TrieNode,
    entries: usize,
}

impl AbbrevTrie {
    /// Creates an empty trie.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an abbreviation with its expansion.
    ///
    /// The key is lowercased and grapheme-reversed internally; callers pass
    /// the abbreviation as typed. Inserting the same abbreviation twice
    /// keeps the last expansion. The empty abbreviation is legal and marks
    /// the root itself terminal. Cost is O(graphemes in `abbrev`).
    ///
    /// # Arguments
    ///
    /// * `abbrev` - The abbreviation as the user would type it.
    /// * `expansion` - The text that replaces it.
    pub fn insert<A, E>(&mut self, abbrev: A, expansion: E)
    where
        A: AsRef<str>,
        E: Into<String>,
    {
        let key = abbrev.as_ref().to_lowercase();

        let mut node = &mut self.root;
        for grapheme in key.graphemes(true).rev() {
            node = node.children.entry(grapheme.to_string()).or_default();
        }

        if node.expansion.replace(expansion.into()).is_none() {
            self.entries += 1;
        }
    }

    /// Removes all entries. Used before a full rebuild.
    pub fn clear(&mut self) {
        self.root = TrieNode::new();
        self.entries = 0;
    }

    /// Number of stored abbreviations.
    pub fn len(&self) -> usize {
        self.entries
    }

    /// Whether the trie holds no abbreviations.
    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }

    pub(crate) fn root(&self) -> &TrieNode {
        &self.root
    }
}
