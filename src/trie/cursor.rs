//! Incremental traversal over an abbreviation trie.
//!
//! A cursor walks one grapheme at a time, which is what lets the expansion
//! planner scan backward from the typing cursor without re-traversing the
//! already-consumed suffix on every step.

use super::node::TrieNode;
use super::AbbrevTrie;

/// Outcome of advancing a [`TrieCursor`] by one grapheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance<'a> {
    /// No outgoing edge for the grapheme. The cursor is exhausted: every
    /// further call will report `Miss` again, and the caller should discard
    /// it and start a fresh cursor for the next attempt.
    Miss,

    /// Moved to a child node that does not end a stored abbreviation.
    Partial,

    /// Moved to a terminal child node; carries the stored expansion.
    Terminal(&'a str),
}

impl<'a> Advance<'a> {
    /// Whether the cursor moved (either [`Advance::Partial`] or
    /// [`Advance::Terminal`]).
    pub fn moved(&self) -> bool {
        !matches!(self, Advance::Miss)
    }

    /// The expansion text if this step reached a terminal node.
    pub fn expansion(&self) -> Option<&'a str> {
        match self {
            Advance::Terminal(text) => Some(text),
            _ => None,
        }
    }
}

/// Stateful traversal over one trie snapshot.
///
/// Created positioned at the root; bound to the trie it was created from for
/// its whole lifetime, so a rebuild cannot invalidate a cursor mid-scan.
/// Identical sequences of [`TrieCursor::advance`] calls over the same trie
/// always yield identical results: the only state is the current position.
#[derive(Debug, Clone)]
pub struct TrieCursor<'a> {
    node: &'a TrieNode,
    exhausted: bool,
}

impl<'a> TrieCursor<'a> {
    /// Creates a cursor positioned at the trie's root.
    pub fn new(trie: &'a AbbrevTrie) -> Self {
        Self {
            node: trie.root(),
            exhausted: false,
        }
    }

    /// Advances by one grapheme cluster.
    ///
    /// The caller must pass the grapheme already lowercased, matching the
    /// normalization applied on insertion.
    ///
    /// # Arguments
    ///
    /// * `grapheme` - The next (lowercased) grapheme of the reversed key.
    ///
    /// # Returns
    ///
    /// An [`Advance`] describing whether the cursor moved and whether the
    /// new position ends a stored abbreviation.
    pub fn advance(&mut self, grapheme: &str) -> Advance<'a> {
        if self.exhausted {
            return Advance::Miss;
        }

        match self.node.children.get(grapheme) {
            Some(child) => {
                self.node = child;
                match child.expansion.as_deref() {
                    Some(expansion) => Advance::Terminal(expansion),
                    None => Advance::Partial,
                }
            }
            None => {
                self.exhausted = true;
                Advance::Miss
            }
        }
    }

    /// Whether the current position ends a stored abbreviation.
    ///
    /// Relevant before the first `advance` only for the empty-key case,
    /// where the root itself is terminal.
    pub fn is_terminal(&self) -> bool {
        !self.exhausted && self.node.is_terminal()
    }
}
