//! Data exchanged between the knowledge engine, the composer and the gateway.

use serde::{Deserialize, Serialize};

/// One knowledge-base record: trigger keywords plus answer content.
///
/// Keywords are lowercase, non-empty and deduplicated in first-seen order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    keywords: Vec<String>,
    content: String,
}

impl Entry {
    /// Build an entry, normalizing keywords. Returns `None` when no usable
    /// keyword remains or the content is blank.
    pub fn new<I, S>(keywords: I, content: impl Into<String>) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for kw in keywords {
            let kw = kw.as_ref().trim().to_lowercase();
            if !kw.is_empty() && !normalized.contains(&kw) {
                normalized.push(kw);
            }
        }
        let content = content.into().trim().to_string();
        if normalized.is_empty() || content.is_empty() {
            return None;
        }
        Some(Self {
            keywords: normalized,
            content,
        })
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Local entries merged into a single answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombinedAnswer {
    pub content: String,
    /// Arithmetic mean of the combined entries' scores.
    pub score: f64,
    pub matched_keywords: Vec<String>,
    pub entries_combined: usize,
}

/// Where the final answer came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Local,
    Web,
    None,
}

/// Coarse confidence label shown to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
    None,
}

/// Advisory attached to web answers when the lookup degraded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackIssue {
    Timeout,
    Unavailable,
}

/// The user-facing answer for one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub query: String,
    pub answer: String,
    pub source: Source,
    pub confidence: Confidence,
    pub bytes: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub truncated: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_keywords: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entries_combined: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_error: Option<FallbackIssue>,
    pub kb_entries: usize,
}

/// Read-only snapshot of configuration and store size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub knowledge_base_entries: usize,
    pub max_response_size_bytes: usize,
    pub web_fallback_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub knowledge_source: Option<String>,
    pub loaded_at: chrono::DateTime<chrono::Utc>,
}
