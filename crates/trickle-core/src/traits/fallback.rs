//! Fallback provider contract: the external lookup used when no local
//! entry is relevant enough.
//!
//! Providers never fail with an error: every outcome, including timeouts
//! and transport failures, is one of the [`FallbackOutcome`] variants.

use async_trait::async_trait;

use crate::types::FallbackIssue;

pub const NO_RESULTS_MESSAGE: &str = "No web results found. Please try a different query.";
pub const TIMEOUT_MESSAGE: &str = "Search timeout - connection too slow. Try again later.";
pub const UNAVAILABLE_MESSAGE: &str = "Web search unavailable. Using local knowledge only.";

/// Result of one fallback lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackOutcome {
    Found { content: String, bytes_used: usize },
    NoResults,
    Timeout,
    /// Any other failure. The reason is for logs only.
    Unavailable(String),
}

/// Content the composer surfaces for an outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackReply {
    pub content: String,
    pub bytes_used: usize,
    pub issue: Option<FallbackIssue>,
}

impl FallbackOutcome {
    pub fn found(content: impl Into<String>) -> Self {
        let content = content.into();
        let bytes_used = content.chars().count();
        FallbackOutcome::Found { content, bytes_used }
    }

    pub fn into_reply(self) -> FallbackReply {
        match self {
            FallbackOutcome::Found { content, bytes_used } => FallbackReply {
                content,
                bytes_used,
                issue: None,
            },
            FallbackOutcome::NoResults => FallbackReply {
                content: NO_RESULTS_MESSAGE.into(),
                bytes_used: 0,
                issue: None,
            },
            FallbackOutcome::Timeout => FallbackReply {
                content: TIMEOUT_MESSAGE.into(),
                bytes_used: 0,
                issue: Some(FallbackIssue::Timeout),
            },
            FallbackOutcome::Unavailable(_) => FallbackReply {
                content: UNAVAILABLE_MESSAGE.into(),
                bytes_used: 0,
                issue: Some(FallbackIssue::Unavailable),
            },
        }
    }
}

/// External lookup consulted when the local knowledge base cannot answer.
#[async_trait]
pub trait FallbackProvider: Send + Sync {
    /// Provider name for logs and stats.
    fn name(&self) -> &str;

    /// Look up `query`. Must not panic and must not hang past its own
    /// transport timeout; the caller also bounds the call.
    async fn search(&self, query: &str) -> FallbackOutcome;
}
