//! Thread name normalization.

/// Normalize a thread name for matching: trimmed and lowercased.
///
/// Exact lookups and search both compare normalized forms, so callers must
/// pass queries through this function too.
///
/// # Examples
///
/// ```
/// use forumwarden_core::normalize_name;
///
/// assert_eq!(normalize_name("  Elden Ring "), "elden ring");
/// ```
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}
