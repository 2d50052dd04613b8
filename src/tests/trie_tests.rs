//! Tests for the abbreviation trie and its traversal cursor.

use std::collections::HashMap;

use proptest::prelude::*;
use unicode_segmentation::UnicodeSegmentation;

use super::test_utils::{abbrev_strategy, expansion_strategy, trie_of};
use crate::trie::{AbbrevTrie, Advance, TrieCursor};

/// Walks the cursor through the reversed, lowercased form of `abbrev`,
/// returning the advance outcomes in order.
fn scan<'a>(trie: &'a AbbrevTrie, abbrev: &str) -> Vec<Advance<'a>> {
    let key = abbrev.to_lowercase();
    let mut cursor = TrieCursor::new(trie);
    key.graphemes(true)
        .rev()
        .map(|g| cursor.advance(g))
        .collect()
}

#[test]
fn test_insert_and_scan() {
    let trie = trie_of(&[("brb", "be right back")]);

    let steps = scan(&trie, "brb");
    assert_eq!(
        steps,
        vec![
            Advance::Partial,
            Advance::Partial,
            Advance::Terminal("be right back"),
        ]
    );
}

#[test]
fn test_miss_exhausts_cursor() {
    let trie = trie_of(&[("brb", "be right back")]);

    let mut cursor = TrieCursor::new(&trie);
    assert_eq!(cursor.advance("z"), Advance::Miss);

    // Once exhausted, the cursor stays exhausted even for edges that exist
    // from the root.
    assert_eq!(cursor.advance("b"), Advance::Miss);
    assert!(!cursor.is_terminal());
}

#[test]
fn test_case_folding_on_insert() {
    let trie = trie_of(&[("BRB", "be right back")]);

    let steps = scan(&trie, "brb");
    assert_eq!(steps.last().unwrap().expansion(), Some("be right back"));
}

#[test]
fn test_last_write_wins() {
    let mut trie = AbbrevTrie::new();
    trie.insert("omw", "on my way");
    trie.insert("omw", "oh my word");

    assert_eq!(trie.len(), 1);
    let steps = scan(&trie, "omw");
    assert_eq!(steps.last().unwrap().expansion(), Some("oh my word"));
}

#[test]
fn test_empty_key_marks_root_terminal() {
    let mut trie = AbbrevTrie::new();
    assert!(!TrieCursor::new(&trie).is_terminal());

    trie.insert("", "nothing");
    assert_eq!(trie.len(), 1);
    assert!(TrieCursor::new(&trie).is_terminal());
}

#[test]
fn test_shorter_key_reported_before_longer() {
    // "omw" reversed is "wmo", "mw" reversed is "wm": the shorter stored
    // key ends one step earlier on the shared path.
    let trie = trie_of(&[("omw", "on my way"), ("mw", "my word")]);

    let steps = scan(&trie, "omw");
    assert_eq!(
        steps,
        vec![
            Advance::Partial,
            Advance::Terminal("my word"),
            Advance::Terminal("on my way"),
        ]
    );
}

#[test]
fn test_clear_empties_trie() {
    let mut trie = trie_of(&[("brb", "be right back"), ("omw", "on my way")]);
    assert_eq!(trie.len(), 2);

    trie.clear();
    assert!(trie.is_empty());
    assert_eq!(scan(&trie, "brb"), vec![Advance::Miss; 3]);
}

#[test]
fn test_multibyte_keys_traverse_by_grapheme() {
    let trie = trie_of(&[("département", "the department")]);

    let steps = scan(&trie, "département");
    assert!(steps.iter().all(Advance::moved));
    assert_eq!(steps.last().unwrap().expansion(), Some("the department"));
}

proptest! {
    /// Every inserted key is reachable: each step of a fresh scan moves,
    /// and the final step lands on a terminal carrying the key's value.
    #[test]
    fn prop_inserted_keys_are_reachable(
        entries in proptest::collection::hash_map(abbrev_strategy(), expansion_strategy(), 1..20)
    ) {
        let mut trie = AbbrevTrie::new();
        for (abbrev, expansion) in &entries {
            trie.insert(abbrev, expansion.clone());
        }
        prop_assert_eq!(trie.len(), entries.len());

        for (abbrev, expansion) in &entries {
            let steps = scan(&trie, abbrev);
            prop_assert!(steps.iter().all(Advance::moved));
            prop_assert_eq!(steps.last().unwrap().expansion(), Some(expansion.as_str()));
        }
    }

    /// Clearing and reinserting the same pairs is behaviorally
    /// indistinguishable from the original trie.
    #[test]
    fn prop_clear_and_reinsert_is_idempotent(
        entries in proptest::collection::hash_map(abbrev_strategy(), expansion_strategy(), 1..20)
    ) {
        let mut trie = AbbrevTrie::new();
        for (abbrev, expansion) in &entries {
            trie.insert(abbrev, expansion.clone());
        }

        let before: HashMap<String, Option<String>> = entries
            .keys()
            .map(|k| {
                let found = scan(&trie, k).last().unwrap().expansion().map(str::to_string);
                (k.clone(), found)
            })
            .collect();

        trie.clear();
        for (abbrev, expansion) in &entries {
            trie.insert(abbrev, expansion.clone());
        }

        for (abbrev, expected) in before {
            prop_assert_eq!(
                scan(&trie, &abbrev).last().unwrap().expansion(),
                expected.as_deref()
            );
        }
        prop_assert_eq!(trie.len(), entries.len());
    }
}
