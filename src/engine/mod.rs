//! Expansion planning.
//!
//! This module is the pure side of expansion: given a field's text and the
//! cursor offset, decide whether the text immediately before the cursor is a
//! recognized abbreviation on a word boundary, and if so what the field
//! should become. It never touches a field; applying the result is the
//! session's job, which keeps the matching logic unit-testable without any
//! UI environment.
//!
//! Offsets are grapheme-cluster offsets, matching the trie's traversal unit.

use unicode_segmentation::UnicodeSegmentation;

use crate::trie::{AbbrevTrie, Advance, TrieCursor};

/// A planned expansion: the full replacement text for the field and the new
/// collapsed cursor offset (in grapheme clusters).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    /// Complete new field text.
    pub text: String,

    /// New cursor offset, positioned right after the inserted expansion.
    pub cursor: usize,
}

/// Plans an expansion for `text` with the cursor at grapheme offset
/// `cursor`.
///
/// Scans backward from the cursor one grapheme at a time, driving a
/// [`TrieCursor`]. The scan commits to the FIRST terminal node it reaches
/// (the shortest stored abbreviation ending at the cursor); it never keeps
/// scanning past a terminal looking for a longer match. At that terminal the
/// grapheme before the matched span must be a word boundary (start of text,
/// or a grapheme with no alphanumeric scalar); if it is not, the attempt is
/// abandoned there, again with no further scanning.
///
/// Capitalization is preserved: when the first matched grapheme was typed
/// uppercase, the first character of the expansion is uppercased.
///
/// # Arguments
///
/// * `trie` - The current abbreviation trie snapshot.
/// * `text` - The field's full text.
/// * `cursor` - Cursor offset in grapheme clusters, clamped to the text.
///
/// # Returns
///
/// `Some(Replacement)` when a boundary-respecting abbreviation ends exactly
/// at the cursor, `None` otherwise. `None` is the common case and not an
/// error: most keystrokes do not complete an abbreviation.
pub fn plan_expansion(trie: &AbbrevTrie, text: &str, cursor: usize) -> Option<Replacement> {
    let graphemes: Vec<&str> = text.graphemes(true).collect();
    let cursor = cursor.min(graphemes.len());

    let mut walker = TrieCursor::new(trie);
    for start in (0..cursor).rev() {
        let grapheme = graphemes[start].to_lowercase();
        match walker.advance(&grapheme) {
            Advance::Miss => return None,
            Advance::Partial => continue,
            Advance::Terminal(expansion) => {
                if !starts_at_boundary(&graphemes, start) {
                    // A failed boundary check at the first terminal ends the
                    // attempt outright; there is no search for a longer
                    // alternative match.
                    return None;
                }
                return Some(build_replacement(&graphemes, start, cursor, expansion));
            }
        }
    }

    // Reached the start of the text without hitting a terminal.
    None
}

/// Whether a match beginning at grapheme index `start` sits on a word
/// boundary: either the start of the text, or preceded by a grapheme
/// containing no alphanumeric scalar.
fn starts_at_boundary(graphemes: &[&str], start: usize) -> bool {
    match start.checked_sub(1) {
        None => true,
        Some(prev) => !graphemes[prev].chars().any(char::is_alphanumeric),
    }
}

fn build_replacement(
    graphemes: &[&str],
    start: usize,
    cursor: usize,
    expansion: &str,
) -> Replacement {
    let before: String = graphemes[..start].concat();
    let after: String = graphemes[cursor..].concat();

    let typed_upper = graphemes[start].chars().any(char::is_uppercase);
    let expansion = if typed_upper {
        capitalize_first(expansion)
    } else {
        expansion.to_string()
    };

    let new_cursor = start + expansion.graphemes(true).count();
    Replacement {
        text: format!("{before}{expansion}{after}"),
        cursor: new_cursor,
    }
}

/// Uppercases only the first character, leaving the rest of the string
/// untouched.
fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
