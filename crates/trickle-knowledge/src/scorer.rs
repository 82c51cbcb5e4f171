//! Relevance scoring between a query and one entry.
//!
//! Per keyword, the first rule that applies wins:
//! 1. keyword is a substring of the lowercased query  → +10
//! 2. keyword equals one of the query tokens          → +8
//! 3. a query token longer than 3 chars contains, or is contained in,
//!    the keyword                                      → +3 (first token only)
//!
//! More than one matched keyword adds `2 × matched` on top.

use regex::Regex;
use std::sync::LazyLock;
use trickle_core::types::Entry;

pub const SUBSTRING_WEIGHT: f64 = 10.0;
pub const TOKEN_WEIGHT: f64 = 8.0;
pub const PARTIAL_WEIGHT: f64 = 3.0;
pub const MULTI_MATCH_BONUS: f64 = 2.0;
/// Tokens must be strictly longer than this to partial-match.
pub const PARTIAL_MIN_LEN: usize = 3;

static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").expect("static word pattern"));

/// Score and the keywords that produced it, in entry keyword order.
#[derive(Debug, Clone, PartialEq)]
pub struct Relevance {
    pub score: f64,
    pub matched_keywords: Vec<String>,
}

/// A query lowercased and tokenized once, reusable across entries.
#[derive(Debug, Clone)]
pub struct PreparedQuery {
    lowered: String,
    /// Distinct word tokens in order of first appearance.
    tokens: Vec<String>,
}

impl PreparedQuery {
    pub fn new(query: &str) -> Self {
        let lowered = query.to_lowercase();
        let mut tokens: Vec<String> = Vec::new();
        for m in WORD.find_iter(&lowered) {
            let tok = m.as_str();
            if !tokens.iter().any(|t| t == tok) {
                tokens.push(tok.to_string());
            }
        }
        Self { lowered, tokens }
    }

    pub fn lowered(&self) -> &str {
        &self.lowered
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    fn partial_match(&self, keyword: &str) -> bool {
        self.tokens
            .iter()
            .filter(|t| t.chars().count() > PARTIAL_MIN_LEN)
            .any(|t| keyword.contains(t.as_str()) || t.contains(keyword))
    }
}

/// Score one entry against a raw query string.
pub fn score(query: &str, entry: &Entry) -> Relevance {
    score_prepared(&PreparedQuery::new(query), entry)
}

/// Score one entry against an already prepared query.
pub fn score_prepared(query: &PreparedQuery, entry: &Entry) -> Relevance {
    let mut total = 0.0;
    let mut matched: Vec<String> = Vec::new();

    for keyword in entry.keywords() {
        let kw = keyword.to_lowercase();
        let weight = if query.lowered.contains(kw.as_str()) {
            SUBSTRING_WEIGHT
        } else if query.tokens.iter().any(|t| *t == kw) {
            TOKEN_WEIGHT
        } else if query.partial_match(&kw) {
            PARTIAL_WEIGHT
        } else {
            continue;
        };
        total += weight;
        matched.push(keyword.clone());
    }

    if matched.len() > 1 {
        total += MULTI_MATCH_BONUS * matched.len() as f64;
    }

    Relevance {
        score: total,
        matched_keywords: matched,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(keywords: &[&str], content: &str) -> Entry {
        Entry::new(keywords.iter().copied(), content).unwrap()
    }

    #[test]
    fn test_reset_password_scenario() {
        let e = entry(&["password", "reset"], "Go to settings > security > reset password.");
        let r = score("reset my password", &e);
        // 10 + 10 + bonus 2×2
        assert_eq!(r.score, 24.0);
        assert_eq!(r.matched_keywords, vec!["password", "reset"]);
    }

    #[test]
    fn test_substring_beats_token_match() {
        // "wifi" is both a substring and a token; only the substring rule counts.
        let e = entry(&["wifi"], "Router is in the hall.");
        let r = score("wifi down", &e);
        assert_eq!(r.score, 10.0);
        assert_eq!(r.matched_keywords, vec!["wifi"]);
    }

    #[test]
    fn test_partial_match_requires_long_token() {
        let e = entry(&["networking"], "See the network guide.");
        assert_eq!(score("network issue", &e).score, 3.0);
        // "net" has 3 chars and is too short to partial-match
        assert_eq!(score("net", &e).score, 0.0);
    }

    #[test]
    fn test_partial_match_token_contains_keyword() {
        let e = entry(&["mail", "x-ray"], "Mail help.");
        // "mail" is a substring of "emails" -> substring rule
        assert_eq!(score("emails", &e).score, 10.0);

        let e = entry(&["e-mails"], "Mail help.");
        // token "mails" (len 5) is contained in keyword "e-mails"
        let r = score("mails broken", &e);
        assert_eq!(r.score, 3.0);
        assert_eq!(r.matched_keywords, vec!["e-mails"]);
    }

    #[test]
    fn test_partial_match_counts_once_per_keyword() {
        let e = entry(&["configuration"], "Config docs.");
        // both "config" and "configur" partial-match; only +3 once
        let r = score("config configur", &e);
        assert_eq!(r.score, 3.0);
        assert_eq!(r.matched_keywords.len(), 1);
    }

    #[test]
    fn test_multi_match_bonus_mixed_rules() {
        let e = entry(&["printer", "jam", "paperwork"], "Open tray B.");
        // printer: substring (10); jam: substring (10); paperwork: partial via "paper" (3)
        let r = score("Printer JAM with paper", &e);
        assert_eq!(r.score, 10.0 + 10.0 + 3.0 + 2.0 * 3.0);
        assert_eq!(r.matched_keywords, vec!["printer", "jam", "paperwork"]);
    }

    #[test]
    fn test_single_match_has_no_bonus() {
        let e = entry(&["vpn", "firewall"], "Use the VPN client.");
        assert_eq!(score("vpn?", &e).score, 10.0);
    }

    #[test]
    fn test_no_match_scores_zero() {
        let e = entry(&["battery"], "Charge overnight.");
        let r = score("hello there", &e);
        assert_eq!(r.score, 0.0);
        assert!(r.matched_keywords.is_empty());
    }

    #[test]
    fn test_case_insensitive_and_punctuation_stripped() {
        let e = entry(&["login"], "Use SSO.");
        assert_eq!(score("LOGIN!!!", &e).score, 10.0);
        let q = PreparedQuery::new("Hello, World... hello");
        assert_eq!(q.tokens(), &["hello".to_string(), "world".to_string()]);
        assert_eq!(q.lowered(), "hello, world... hello");
    }

    #[test]
    fn test_keyword_punctuation_preserved() {
        // keyword "c++" never equals a \w token, but is a literal substring
        let e = entry(&["c++"], "Compiler docs.");
        assert_eq!(score("learning c++ today", &e).score, 10.0);
        assert_eq!(score("learning c today", &e).score, 0.0);
    }

    #[test]
    fn test_deterministic() {
        let e = entry(&["update", "software", "install"], "Run the updater.");
        let a = score("how to install software updates", &e);
        let b = score("how to install software updates", &e);
        assert_eq!(a, b);
    }
}
