//! Conversions between serenity models and forumwarden types.

use chrono::DateTime;
use forumwarden_core::{ForumId, ThreadEvent, ThreadId, ThreadMeta, UserId};
use forumwarden_error::{PlatformError, PlatformErrorKind};
use serenity::http::HttpError;
use serenity::model::Timestamp;
use serenity::model::channel::{ChannelType, GuildChannel};

/// Discord JSON error code for an unknown channel.
pub const UNKNOWN_CHANNEL: i64 = 10003;
/// Discord JSON error code for an unknown guild member.
pub const UNKNOWN_MEMBER: i64 = 10007;
/// Discord JSON error code for an unknown user.
pub const UNKNOWN_USER: i64 = 10013;

const MISSING_ACCESS: i64 = 50001;
const MISSING_PERMISSIONS: i64 = 50013;

/// Classify a failed Discord HTTP request.
///
/// # Examples
///
/// ```
/// use forumwarden_discord::{UNKNOWN_MEMBER, classify_http_failure};
/// use forumwarden_error::PlatformErrorKind;
///
/// assert_eq!(
///     classify_http_failure(401, 0, "401: Unauthorized"),
///     PlatformErrorKind::InvalidToken
/// );
/// assert!(matches!(
///     classify_http_failure(404, UNKNOWN_MEMBER, "Unknown Member"),
///     PlatformErrorKind::NotFound(_)
/// ));
/// ```
pub fn classify_http_failure(status: u16, code: i64, message: &str) -> PlatformErrorKind {
    match (status, code) {
        (401, _) => PlatformErrorKind::InvalidToken,
        (_, UNKNOWN_CHANNEL | UNKNOWN_MEMBER | UNKNOWN_USER) | (404, _) => {
            PlatformErrorKind::NotFound(message.to_string())
        }
        (_, MISSING_ACCESS | MISSING_PERMISSIONS) | (403, _) => {
            PlatformErrorKind::PermissionDenied(message.to_string())
        }
        _ => PlatformErrorKind::Transport(format!("HTTP {status}: {message}")),
    }
}

/// Discord JSON error code of a failed request, if the error carries one.
pub(crate) fn json_error_code(err: &serenity::Error) -> Option<i64> {
    match err {
        serenity::Error::Http(HttpError::UnsuccessfulRequest(response)) => {
            Some(response.error.code as i64)
        }
        _ => None,
    }
}

/// Convert a serenity error into a platform error.
#[track_caller]
pub fn platform_error(err: serenity::Error) -> PlatformError {
    match &err {
        serenity::Error::Http(HttpError::UnsuccessfulRequest(response)) => {
            PlatformError::new(classify_http_failure(
                response.status_code.as_u16(),
                response.error.code as i64,
                &response.error.message,
            ))
        }
        _ => PlatformError::transport(err.to_string()),
    }
}

/// Build thread metadata from raw channel fields.
///
/// Returns `None` when the channel has no parent or no owner, which means it
/// is not a forum post. The creation time falls back to the one encoded in the
/// id when the platform does not report it.
pub fn thread_meta_from_parts(
    id: u64,
    parent_id: Option<u64>,
    owner_id: Option<u64>,
    name: &str,
    created_unix_secs: Option<i64>,
) -> Option<ThreadMeta> {
    let meta = ThreadMeta::new(ThreadId(id), ForumId(parent_id?), UserId(owner_id?), name);
    match created_unix_secs.and_then(|secs| DateTime::from_timestamp(secs, 0)) {
        Some(created_at) => Some(meta.with_created_at(created_at)),
        None => Some(meta),
    }
}

fn is_thread(kind: ChannelType) -> bool {
    matches!(
        kind,
        ChannelType::PublicThread | ChannelType::PrivateThread | ChannelType::NewsThread
    )
}

/// Thread metadata for a thread channel; `None` for any other channel.
pub fn thread_meta_from_channel(channel: &GuildChannel) -> Option<ThreadMeta> {
    if !is_thread(channel.kind) {
        return None;
    }
    thread_meta_from_parts(
        channel.id.get(),
        channel.parent_id.map(|id| id.get()),
        channel.owner_id.map(|id| id.get()),
        &channel.name,
        channel
            .thread_metadata
            .as_ref()
            .and_then(|metadata| metadata.create_timestamp)
            .map(|timestamp| timestamp.unix_timestamp()),
    )
}

/// Upsert event for a created or updated thread channel.
pub fn thread_event_from_channel(channel: &GuildChannel) -> Option<ThreadEvent> {
    thread_meta_from_channel(channel).map(ThreadEvent::Upserted)
}

/// Query parameters for one page of archived public threads.
///
/// Discord expects the `before` cursor as an ISO8601 timestamp, not a
/// snowflake or Unix seconds.
///
/// # Examples
///
/// ```
/// use forumwarden_discord::archived_threads_query;
/// use serenity::model::Timestamp;
///
/// let before = Timestamp::from_unix_timestamp(1_717_243_200).unwrap();
/// let query = archived_threads_query(Some(&before), 100);
/// assert!(query[0].1.starts_with("2024-06-01T12:00:00"));
/// assert_eq!(query[1], ("limit", "100".to_string()));
/// ```
pub fn archived_threads_query(
    before: Option<&Timestamp>,
    limit: u64,
) -> Vec<(&'static str, String)> {
    let mut params = Vec::with_capacity(2);
    if let Some(before) = before {
        params.push(("before", before.to_string()));
    }
    params.push(("limit", limit.to_string()));
    params
}
