//! Ranking: score every entry, keep the positive ones, top-K.

use std::cmp::Ordering;
use trickle_core::error::{Result, TrickleError};
use trickle_core::types::Entry;

use crate::scorer::{self, PreparedQuery};

/// An entry with its score for one query.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredEntry<'a> {
    pub entry: &'a Entry,
    pub score: f64,
    pub matched_keywords: Vec<String>,
}

/// Rank `entries` against `query`.
///
/// Entries scoring `<= 0` are dropped. The rest are sorted by score,
/// highest first; equal scores keep their store order. At most
/// `max_results` entries are returned.
pub fn rank<'a>(query: &str, entries: &'a [Entry], max_results: usize) -> Result<Vec<ScoredEntry<'a>>> {
    if max_results == 0 {
        return Err(TrickleError::Invariant("max_results must be at least 1".into()));
    }

    let prepared = PreparedQuery::new(query);
    let mut results = Vec::new();

    for entry in entries {
        let relevance = scorer::score_prepared(&prepared, entry);
        if !relevance.score.is_finite() {
            return Err(TrickleError::Invariant(format!(
                "non-finite score {} for entry {:?}",
                relevance.score,
                entry.keywords()
            )));
        }
        if relevance.score > 0.0 {
            results.push(ScoredEntry {
                entry,
                score: relevance.score,
                matched_keywords: relevance.matched_keywords,
            });
        }
    }

    // sort_by is stable: ties keep store order
    results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    results.truncate(max_results);
    Ok(results)
}
