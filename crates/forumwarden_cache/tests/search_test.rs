//! Tests for scored thread search.

use chrono::{TimeZone, Utc};
use forumwarden_cache::{ForumIndex, search_index};
use forumwarden_core::{ForumId, ThreadId, ThreadMeta, UserId};

const FORUM: ForumId = ForumId(1000);

fn thread_meta(id: u64, name: &str) -> ThreadMeta {
    ThreadMeta::new(ThreadId(id << 22), FORUM, UserId(id), name)
}

fn ids(results: &[ThreadMeta]) -> Vec<u64> {
    results.iter().map(|t| t.id().get() >> 22).collect()
}

fn library() -> ForumIndex {
    ForumIndex::build(
        FORUM,
        vec![
            thread_meta(1, "Hollow Knight"),
            thread_meta(2, "Hollow Knight: Silksong"),
            thread_meta(3, "Knights of the Old Republic"),
            thread_meta(4, "Shovel Knight"),
            thread_meta(5, "Stardew Valley"),
            thread_meta(6, "Darkest Dungeon"),
        ],
        None,
    )
}

#[test]
fn test_tiers_order_results() {
    let results = search_index(&library(), "knight", 10);
    // Prefix (3) beats word prefix (1, 2 and 4, newest first); no substring-only hits
    assert_eq!(ids(&results), vec![3, 4, 2, 1]);
}

#[test]
fn test_exact_match_ranks_first() {
    let results = search_index(&library(), "  HOLLOW knight", 10);
    assert_eq!(ids(&results)[0], 1);
    assert_eq!(ids(&results)[1], 2);
}

#[test]
fn test_substring_below_word_prefix() {
    let results = search_index(&library(), "ight", 10);
    assert!(!results.is_empty());
    // every hit is a substring match inside a word; newest first
    assert_eq!(ids(&results), vec![4, 3, 2, 1]);
}

#[test]
fn test_fuzzy_matches_gapped_query() {
    let results = search_index(&library(), "stdw", 10);
    assert_eq!(ids(&results), vec![5]);
}

#[test]
fn test_no_match_returns_empty() {
    assert!(search_index(&library(), "zzzz", 10).is_empty());
}

#[test]
fn test_punctuation_is_matched_literally() {
    for query in ["!", "'", "^", "$", "!zzz", "!dark", "^dark", "dark$", "'dark"] {
        let results = search_index(&library(), query, 10);
        assert!(results.is_empty(), "{query:?} returned {:?}", ids(&results));
    }
}

#[test]
fn test_punctuation_in_names_matches() {
    let index = ForumIndex::build(
        FORUM,
        vec![
            thread_meta(1, "Don't Starve"),
            thread_meta(2, "Dont Look Back"),
            thread_meta(3, "Baba Is You!"),
        ],
        None,
    );
    assert_eq!(ids(&search_index(&index, "don't", 10)), vec![1]);
    assert_eq!(ids(&search_index(&index, "you!", 10)), vec![3]);
}

#[test]
fn test_limit_truncates() {
    assert_eq!(search_index(&library(), "knight", 2).len(), 2);
    assert!(search_index(&library(), "knight", 0).is_empty());
}

#[test]
fn test_empty_query_browses_newest_first() {
    let results = search_index(&library(), "   ", 3);
    assert_eq!(ids(&results), vec![6, 5, 4]);
}

#[test]
fn test_equal_scores_prefer_recent_creation_then_higher_id() {
    let same_instant = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let later = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    let index = ForumIndex::build(
        FORUM,
        vec![
            ThreadMeta::new(ThreadId(30), FORUM, UserId(1), "Celeste").with_created_at(same_instant),
            ThreadMeta::new(ThreadId(10), FORUM, UserId(2), "Celeste").with_created_at(later),
            ThreadMeta::new(ThreadId(20), FORUM, UserId(3), "Celeste").with_created_at(same_instant),
        ],
        None,
    );
    let results = search_index(&index, "celeste", 10);
    let raw: Vec<u64> = results.iter().map(|t| t.id().get()).collect();
    assert_eq!(raw, vec![10, 30, 20]);
}

#[test]
fn test_search_is_deterministic() {
    let index = library();
    let first = search_index(&index, "k", 10);
    for _ in 0..10 {
        assert_eq!(search_index(&index, "k", 10), first);
    }
}
