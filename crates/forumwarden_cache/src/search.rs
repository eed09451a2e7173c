//! Scored name search over a forum index.

use crate::ForumIndex;
use forumwarden_core::{ThreadMeta, normalize_name};
use nucleo_matcher::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};
use std::cmp::Ordering;

/// How a thread name matched the query, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MatchTier {
    /// The query's characters appear in order, possibly with gaps.
    Fuzzy,
    /// The query appears inside a word.
    Substring,
    /// The query starts a word other than the first.
    WordPrefix,
    /// The name starts with the query.
    Prefix,
    /// The name equals the query.
    Exact,
}

/// Score of one candidate. Compares by tier, then by fuzzy score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MatchScore {
    /// Match tier.
    pub tier: MatchTier,
    /// Matcher score; only meaningful within the `Fuzzy` tier, zero otherwise.
    pub fuzzy: u32,
}

impl MatchScore {
    fn tier(tier: MatchTier) -> Self {
        Self { tier, fuzzy: 0 }
    }
}

/// Fuzzy scorer holding a reusable matcher.
///
/// Every query word is a plain fuzzy atom; characters such as `!`, `'`, `^`
/// and `$` are matched literally.
struct Scorer {
    matcher: Matcher,
    pattern: Pattern,
    query: String,
    buf: Vec<char>,
}

impl Scorer {
    fn new(query: &str) -> Self {
        Self {
            matcher: Matcher::new(Config::DEFAULT),
            pattern: Pattern::new(
                query,
                CaseMatching::Ignore,
                Normalization::Smart,
                AtomKind::Fuzzy,
            ),
            query: query.to_string(),
            buf: Vec::new(),
        }
    }

    fn score(&mut self, name: &str) -> Option<MatchScore> {
        let query = self.query.as_str();
        if name == query {
            return Some(MatchScore::tier(MatchTier::Exact));
        }
        if name.starts_with(query) {
            return Some(MatchScore::tier(MatchTier::Prefix));
        }
        let mut found = false;
        for (start, _) in name.match_indices(query) {
            found = true;
            let starts_word = name[..start]
                .chars()
                .next_back()
                .is_some_and(|c| !c.is_alphanumeric());
            if starts_word {
                return Some(MatchScore::tier(MatchTier::WordPrefix));
            }
        }
        if found {
            return Some(MatchScore::tier(MatchTier::Substring));
        }
        let haystack = Utf32Str::new(name, &mut self.buf);
        self.pattern
            .score(haystack, &mut self.matcher)
            .map(|fuzzy| MatchScore {
                tier: MatchTier::Fuzzy,
                fuzzy,
            })
    }
}

/// Newest first: later creation time, then higher id.
fn newest_first(a: &ThreadMeta, b: &ThreadMeta) -> Ordering {
    b.age_key().cmp(&a.age_key())
}

/// Search a forum index by name.
///
/// The query is normalized before matching. Results are ordered best match
/// first; equal scores put the most recently created thread first, then the
/// highest id. An empty query returns the newest threads ("browse" mode).
///
/// # Examples
///
/// ```
/// use forumwarden_cache::{ForumIndex, search_index};
/// use forumwarden_core::{ForumId, ThreadId, ThreadMeta, UserId};
///
/// let forum = ForumId(1);
/// let index = ForumIndex::build(
///     forum,
///     vec![
///         ThreadMeta::new(ThreadId(1 << 22), forum, UserId(1), "Dark Souls"),
///         ThreadMeta::new(ThreadId(2 << 22), forum, UserId(2), "Dark Souls III"),
///         ThreadMeta::new(ThreadId(3 << 22), forum, UserId(3), "Stardew Valley"),
///     ],
///     None,
/// );
///
/// let hits = search_index(&index, "dark souls", 10);
/// assert_eq!(hits.len(), 2);
/// assert_eq!(hits[0].name(), "Dark Souls");
/// ```
pub fn search_index(index: &ForumIndex, query: &str, limit: usize) -> Vec<ThreadMeta> {
    if limit == 0 {
        return Vec::new();
    }
    let query = normalize_name(query);

    if query.is_empty() {
        let mut all: Vec<&ThreadMeta> = index.iter().collect();
        all.sort_by(|a, b| newest_first(a, b));
        return all.into_iter().take(limit).cloned().collect();
    }

    let mut scorer = Scorer::new(&query);
    let mut scored: Vec<(MatchScore, &ThreadMeta)> = index
        .iter()
        .filter_map(|thread| {
            scorer
                .score(thread.normalized_name())
                .map(|score| (score, thread))
        })
        .collect();

    scored.sort_by(|(score_a, a), (score_b, b)| {
        score_b.cmp(score_a).then_with(|| newest_first(a, b))
    });

    scored
        .into_iter()
        .take(limit)
        .map(|(_, thread)| thread.clone())
        .collect()
}
