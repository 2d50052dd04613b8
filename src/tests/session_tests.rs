//! Tests for the session: activation, reload semantics, and the debounced
//! input path. Timer-dependent tests run over tokio's paused clock so they
//! are deterministic.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::time::Duration;

use super::test_utils::{CountingField, FeedScript, RecordingNotice, ScriptedSource};
use crate::config::source::DEFAULT_SHEET_ID;
use crate::config::DebrevConfig;
use crate::field::EditableField;
use crate::session::{Session, SharedField};

fn pairs(list: &[(&str, &str)]) -> Vec<(String, String)> {
    list.iter()
        .map(|(a, e)| (a.to_string(), e.to_string()))
        .collect()
}

/// Lets every task woken by the paused clock run to completion.
async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test]
async fn test_activate_builds_trie_and_notifies() {
    let source = ScriptedSource::with_pairs(vec![("brb", "be right back")]);
    let notice = Arc::new(RecordingNotice::default());
    let config = DebrevConfig::default();
    let mut session = Session::with_notice(&config, source.clone(), notice.clone());

    let entries = session.activate(None).await.expect("activation failed");
    assert_eq!(entries, 1);
    assert_eq!(notice.announced.lock().as_slice(), &[1]);
    assert_eq!(source.requested.lock().as_slice(), &[DEFAULT_SHEET_ID.to_string()]);

    let got = session.expand("hey brb", 7).expect("expected a match");
    assert_eq!(got.text, "hey be right back");
    assert_eq!(got.cursor, 17);
}

#[tokio::test]
async fn test_reactivation_uses_the_given_sheet_id() {
    let source = ScriptedSource::new(vec![
        FeedScript::Pairs(pairs(&[("brb", "be right back")])),
        FeedScript::Pairs(pairs(&[("ttyl", "talk to you later")])),
    ]);
    let config = DebrevConfig::default();
    let mut session = Session::new(&config, source.clone());

    session.activate(None).await.expect("activation failed");
    session
        .activate(Some("custom-sheet"))
        .await
        .expect("reactivation failed");

    assert_eq!(
        source.requested.lock().as_slice(),
        &[DEFAULT_SHEET_ID.to_string(), "custom-sheet".to_string()]
    );

    // The rebuild is wholesale: the old mapping is gone, the new one live.
    assert!(session.expand("hey brb", 7).is_none());
    assert!(session.expand("hey ttyl", 8).is_some());
}

#[tokio::test]
async fn test_malformed_feed_clears_prior_trie() {
    let source = ScriptedSource::new(vec![
        FeedScript::Pairs(pairs(&[("brb", "be right back")])),
        FeedScript::Malformed(3),
    ]);
    let config = DebrevConfig::default();
    let mut session = Session::new(&config, source);

    session.activate(None).await.expect("activation failed");
    assert_eq!(session.entries(), 1);

    // The feed is authoritative even when invalid: the reload succeeds
    // with an empty mapping and previously-known abbreviations are gone.
    let entries = session.activate(None).await.expect("reload should degrade, not fail");
    assert_eq!(entries, 0);
    assert_eq!(session.entries(), 0);
    assert!(session.expand("hey brb", 7).is_none());
}

#[tokio::test]
async fn test_keep_stale_on_invalid_preserves_prior_trie() {
    let source = ScriptedSource::new(vec![
        FeedScript::Pairs(pairs(&[("brb", "be right back")])),
        FeedScript::Malformed(3),
    ]);
    let mut config = DebrevConfig::default();
    config.expander.keep_stale_on_invalid = true;
    let mut session = Session::new(&config, source);

    session.activate(None).await.expect("activation failed");
    let entries = session.activate(None).await.expect("reload should degrade, not fail");

    assert_eq!(entries, 1);
    assert!(session.expand("hey brb", 7).is_some());
}

#[tokio::test]
async fn test_transport_failure_leaves_trie_in_prior_state() {
    let source = ScriptedSource::new(vec![
        FeedScript::Pairs(pairs(&[("brb", "be right back")])),
        FeedScript::Failure,
    ]);
    let config = DebrevConfig::default();
    let mut session = Session::new(&config, source);

    session.activate(None).await.expect("activation failed");
    session
        .activate(None)
        .await
        .expect_err("transport failure should surface");

    assert_eq!(session.entries(), 1);
    assert!(session.expand("hey brb", 7).is_some());
}

#[tokio::test(start_paused = true)]
async fn test_debounce_coalesces_a_burst_into_one_attempt() {
    let source = ScriptedSource::with_pairs(vec![("brb", "be right back")]);
    let config = DebrevConfig::default(); // 500 ms window
    let mut session = Session::new(&config, source);
    session.activate(None).await.expect("activation failed");

    let field = Arc::new(Mutex::new(CountingField::with_caret_at_end("hey brb")));
    let shared: SharedField = field.clone();

    session.on_input(Some(shared.clone()));
    tokio::time::sleep(Duration::from_millis(100)).await;
    session.on_input(Some(shared));

    // Quiet period after the second event.
    tokio::time::sleep(Duration::from_millis(600)).await;
    settle().await;

    let field = field.lock();
    assert_eq!(field.writes, 1);
    assert_eq!(field.buffer.value(), "hey be right back");
    assert_eq!(field.buffer.selection(), (17, 17));
}

#[tokio::test(start_paused = true)]
async fn test_attempt_sees_field_state_at_quiet_period_expiry() {
    let source = ScriptedSource::with_pairs(vec![("brb", "be right back")]);
    let config = DebrevConfig::default();
    let mut session = Session::new(&config, source);
    session.activate(None).await.expect("activation failed");

    let field = Arc::new(Mutex::new(CountingField::with_caret_at_end("hey br")));
    let shared: SharedField = field.clone();

    session.on_input(Some(shared.clone()));
    tokio::time::sleep(Duration::from_millis(100)).await;

    // The user finishes typing before the second event; only that state is
    // ever evaluated.
    {
        let mut field = field.lock();
        field.buffer = crate::field::TextBuffer::with_caret_at_end("hey brb");
    }
    session.on_input(Some(shared));

    tokio::time::sleep(Duration::from_millis(600)).await;
    settle().await;

    assert_eq!(field.lock().buffer.value(), "hey be right back");
}

#[tokio::test(start_paused = true)]
async fn test_no_match_leaves_field_untouched() {
    let source = ScriptedSource::with_pairs(vec![("brb", "be right back")]);
    let config = DebrevConfig::default();
    let mut session = Session::new(&config, source);
    session.activate(None).await.expect("activation failed");

    let field = Arc::new(Mutex::new(CountingField::with_caret_at_end("xbrb")));
    session.on_input(Some(field.clone() as SharedField));

    tokio::time::sleep(Duration::from_millis(600)).await;
    settle().await;

    let field = field.lock();
    assert_eq!(field.writes, 0);
    assert_eq!(field.buffer.value(), "xbrb");
}

#[tokio::test(start_paused = true)]
async fn test_input_before_activation_is_ignored() {
    let source = ScriptedSource::with_pairs(vec![("brb", "be right back")]);
    let config = DebrevConfig::default();
    let mut session = Session::new(&config, source);

    let field = Arc::new(Mutex::new(CountingField::with_caret_at_end("hey brb")));
    session.on_input(Some(field.clone() as SharedField));

    tokio::time::sleep(Duration::from_millis(600)).await;
    settle().await;

    assert_eq!(field.lock().buffer.value(), "hey brb");
}

#[tokio::test(start_paused = true)]
async fn test_non_editable_target_is_ignored() {
    let source = ScriptedSource::with_pairs(vec![("brb", "be right back")]);
    let config = DebrevConfig::default();
    let mut session = Session::new(&config, source);
    session.activate(None).await.expect("activation failed");

    // A keystroke with no recognized text control behind it.
    session.on_input(None);
    tokio::time::sleep(Duration::from_millis(600)).await;
    settle().await;
}
