//! Response composition: merge the top local matches, decide whether they
//! are good enough, and hold every answer to the size cap.

use trickle_core::config::TRUNCATION_RESERVE;
use trickle_core::error::Result;
use trickle_core::types::{CombinedAnswer, Confidence};
use trickle_knowledge::{EntryStore, ScoredEntry};

pub const TRUNCATION_MARKER: &str = "... [truncated]";
pub const NO_INFORMATION_MESSAGE: &str =
    "No information available in local database. Web search is disabled.";

/// Merge ranked entries into one answer. `None` for an empty ranking.
pub fn combine(results: &[ScoredEntry<'_>]) -> Option<CombinedAnswer> {
    if results.is_empty() {
        return None;
    }

    let content = results
        .iter()
        .map(|r| r.entry.content())
        .collect::<Vec<_>>()
        .join(" ");

    let mut matched_keywords: Vec<String> = Vec::new();
    for kw in results.iter().flat_map(|r| r.matched_keywords.iter()) {
        if !matched_keywords.contains(kw) {
            matched_keywords.push(kw.clone());
        }
    }

    let total: f64 = results.iter().map(|r| r.score).sum();
    Some(CombinedAnswer {
        content,
        score: total / results.len() as f64,
        matched_keywords,
        entries_combined: results.len(),
    })
}

/// Rank `store` for `query` and combine the top `max_local_entries`.
pub fn combine_local(query: &str, store: &EntryStore, max_local_entries: usize) -> Result<Option<CombinedAnswer>> {
    let results = store.search(query, max_local_entries)?;
    Ok(combine(&results))
}

/// Local answer for `query`, kept only when its combined score reaches
/// `min_score`.
pub fn compose(
    query: &str,
    store: &EntryStore,
    max_local_entries: usize,
    min_score: f64,
) -> Result<Option<CombinedAnswer>> {
    Ok(combine_local(query, store, max_local_entries)?.filter(|c| is_accepted(c.score, min_score)))
}

pub fn is_accepted(score: f64, min_score: f64) -> bool {
    score >= min_score
}

/// Confidence label for an accepted local answer.
pub fn local_confidence(score: f64, high_threshold: f64) -> Confidence {
    if score >= high_threshold {
        Confidence::High
    } else {
        Confidence::Medium
    }
}

/// Hold `answer` to `max_chars`. Over-long answers keep their first
/// `max_chars - 50` characters plus [`TRUNCATION_MARKER`]. Returns the
/// answer and whether it was cut.
pub fn enforce_size_cap(answer: String, max_chars: usize) -> (String, bool) {
    if answer.chars().count() <= max_chars {
        return (answer, false);
    }
    let keep = max_chars.saturating_sub(TRUNCATION_RESERVE);
    let mut cut: String = answer.chars().take(keep).collect();
    cut.push_str(TRUNCATION_MARKER);
    (cut, true)
}
