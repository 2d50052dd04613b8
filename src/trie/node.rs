//! Node implementation for the abbreviation trie.
//!
//! Nodes are the building blocks of the trie. Each edge is keyed by one
//! lowercased grapheme cluster; a terminal node carries the expansion text
//! for the abbreviation whose reversed form ends at it.

use std::collections::HashMap;

/// A node in the abbreviation trie.
///
/// A node is terminal exactly when `expansion` is present; there is no
/// separate terminal flag to fall out of sync.
#[derive(Debug, Clone, Default)]
pub struct TrieNode {
    /// Map of lowercased grapheme clusters to child nodes.
    pub(crate) children: HashMap<String, TrieNode>,

    /// Expansion text, present iff this node ends a stored abbreviation.
    pub(crate) expansion: Option<String>,
}

impl TrieNode {
    /// Creates a new empty trie node.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Whether this node ends a stored abbreviation.
    pub(crate) fn is_terminal(&self) -> bool {
        self.expansion.is_some()
    }
}
