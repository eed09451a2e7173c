//! Tests for thread metadata and identifiers.

use chrono::{Duration, TimeZone, Utc};
use forumwarden_core::{
    ForumId, PendingDecision, PruneReason, ThreadId, ThreadMeta, UserId, normalize_name,
    snowflake_timestamp,
};
use std::str::FromStr;

#[test]
fn test_snowflake_timestamp_known_value() {
    // 175928847299117063 is the example snowflake from the Discord docs
    let ts = snowflake_timestamp(175_928_847_299_117_063);
    assert_eq!(ts, Utc.with_ymd_and_hms(2016, 4, 30, 11, 18, 25).unwrap() + Duration::milliseconds(796));
}

#[test]
fn test_higher_id_is_later() {
    let older = ThreadId(1 << 22);
    let newer = ThreadId(2 << 22);
    assert!(older.created_at() < newer.created_at());
}

#[test]
fn test_name_is_trimmed_and_normalized() {
    let thread = ThreadMeta::new(ThreadId(5), ForumId(1), UserId(2), "\tCeleste  ");
    assert_eq!(thread.name(), "Celeste");
    assert_eq!(thread.normalized_name(), "celeste");
    assert_eq!(normalize_name(" CELESTE"), "celeste");
}

#[test]
fn test_age_key_breaks_ties_by_id() {
    let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let a = ThreadMeta::new(ThreadId(111), ForumId(1), UserId(2), "a").with_created_at(created);
    let b = ThreadMeta::new(ThreadId(222), ForumId(1), UserId(2), "b").with_created_at(created);
    assert!(a.age_key() < b.age_key());
}

#[test]
fn test_prune_reason_wire_names() {
    assert_eq!(PruneReason::OwnerDeparted.to_string(), "owner-departed");
    assert_eq!(PruneReason::DuplicateOlder.as_ref(), "duplicate-older");
    assert_eq!(
        PruneReason::from_str("duplicate-older").unwrap(),
        PruneReason::DuplicateOlder
    );
    assert_eq!(
        serde_json::to_string(&PruneReason::OwnerDeparted).unwrap(),
        "\"owner-departed\""
    );
}

#[test]
fn test_pending_decision_copies_thread_fields() {
    let thread = ThreadMeta::new(ThreadId(900), ForumId(1), UserId(44), "Outer Wilds");
    let decision = PendingDecision::flag(&thread, PruneReason::DuplicateOlder);
    assert_eq!(*decision.thread_id(), ThreadId(900));
    assert_eq!(*decision.owner_id(), UserId(44));
    assert_eq!(decision.name(), "Outer Wilds");
    assert_eq!(decision.created_at(), thread.created_at());
}
