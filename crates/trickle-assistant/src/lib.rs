//! # Trickle Assistant
//!
//! Turns a query into a size-bounded answer.
//!
//! ```text
//! query ─▶ local search (top-K, combined)
//!            ├─ score ≥ min_local_score ─▶ local answer (high | medium)
//!            └─ otherwise
//!                 ├─ web fallback enabled ─▶ provider (bounded by timeout, low)
//!                 └─ disabled ─────────────▶ fixed "no information" message
//!          ─▶ size cap ─▶ QueryResponse
//! ```
//! Provider failures never surface as errors; they come back as degraded
//! web answers with an advisory.

pub mod composer;

use std::sync::Arc;
use trickle_core::config::{AssistantConfig, TrickleConfig};
use trickle_core::error::{Result, TrickleError};
use trickle_core::traits::{FallbackOutcome, FallbackProvider};
use trickle_core::types::{CombinedAnswer, Confidence, QueryResponse, Source, Stats};
use trickle_knowledge::KnowledgeBase;

/// Query-answering facade over a knowledge base and an optional fallback.
pub struct Assistant {
    knowledge: Arc<KnowledgeBase>,
    fallback: Option<Arc<dyn FallbackProvider>>,
    settings: AssistantConfig,
}

impl Assistant {
    pub fn new(
        knowledge: Arc<KnowledgeBase>,
        fallback: Option<Arc<dyn FallbackProvider>>,
        settings: AssistantConfig,
    ) -> Self {
        Self {
            knowledge,
            fallback,
            settings,
        }
    }

    /// Load the knowledge file and build the configured fallback provider.
    pub fn from_config(config: &TrickleConfig) -> Result<Self> {
        config.validate()?;
        let knowledge = Arc::new(KnowledgeBase::open(&config.knowledge.resolved_path()));
        let fallback = trickle_providers::create_fallback(config)?;
        Ok(Self::new(knowledge, fallback, config.assistant.clone()))
    }

    pub fn knowledge(&self) -> &Arc<KnowledgeBase> {
        &self.knowledge
    }

    pub fn settings(&self) -> &AssistantConfig {
        &self.settings
    }

    pub fn web_fallback_enabled(&self) -> bool {
        self.settings.enable_web_fallback && self.fallback.is_some()
    }

    /// Answer one query.
    ///
    /// Errors only for a blank query or a broken ranking invariant.
    pub async fn answer(&self, query: &str) -> Result<QueryResponse> {
        let query = query.trim();
        if query.is_empty() {
            return Err(TrickleError::InvalidQuery("Query is required".into()));
        }

        let store = self.knowledge.snapshot();
        let local = composer::compose(
            query,
            &store,
            self.settings.max_combined_entries,
            self.settings.min_local_score,
        )?;

        let mut response = match local {
            Some(combined) => self.local_response(query, combined),
            None => {
                tracing::debug!(
                    "No local answer at or above {:.1} for: {query}",
                    self.settings.min_local_score
                );
                match &self.fallback {
                    Some(provider) if self.settings.enable_web_fallback => {
                        self.web_response(query, provider.as_ref()).await
                    }
                    _ => no_information_response(query),
                }
            }
        };

        let (answer, truncated) =
            composer::enforce_size_cap(std::mem::take(&mut response.answer), self.settings.max_response_size_bytes);
        if truncated {
            tracing::debug!("Answer truncated to {} chars", self.settings.max_response_size_bytes);
            response.truncated = Some(true);
        }
        response.bytes = answer.chars().count();
        response.answer = answer;
        response.kb_entries = store.len();
        Ok(response)
    }

    fn local_response(&self, query: &str, combined: CombinedAnswer) -> QueryResponse {
        let confidence = composer::local_confidence(combined.score, self.settings.high_confidence_threshold);
        tracing::debug!(
            "Local answer: score={:.1} entries={} confidence={:?}",
            combined.score,
            combined.entries_combined,
            confidence
        );
        QueryResponse {
            query: query.to_string(),
            bytes: combined.content.chars().count(),
            answer: combined.content,
            source: Source::Local,
            confidence,
            truncated: None,
            matched_keywords: Some(combined.matched_keywords),
            entries_combined: Some(combined.entries_combined),
            fallback: None,
            fallback_error: None,
            kb_entries: 0,
        }
    }

    async fn web_response(&self, query: &str, provider: &dyn FallbackProvider) -> QueryResponse {
        let timeout = self.settings.web_search_timeout();
        let outcome = match tokio::time::timeout(timeout, provider.search(query)).await {
            Ok(outcome) => outcome,
            Err(_) => {
                tracing::warn!("⚠️ Fallback '{}' exceeded {:?}", provider.name(), timeout);
                FallbackOutcome::Timeout
            }
        };
        let reply = outcome.into_reply();
        tracing::debug!(
            "Web answer from '{}': {} bytes, issue={:?}",
            provider.name(),
            reply.bytes_used,
            reply.issue
        );
        QueryResponse {
            query: query.to_string(),
            answer: reply.content,
            source: Source::Web,
            confidence: Confidence::Low,
            bytes: reply.bytes_used,
            truncated: None,
            matched_keywords: None,
            entries_combined: None,
            fallback: Some(true),
            fallback_error: reply.issue,
            kb_entries: 0,
        }
    }

    /// Read-only snapshot of configuration and store size.
    pub fn stats(&self) -> Stats {
        let store = self.knowledge.snapshot();
        Stats {
            knowledge_base_entries: store.len(),
            max_response_size_bytes: self.settings.max_response_size_bytes,
            web_fallback_enabled: self.web_fallback_enabled(),
            knowledge_source: store.source().map(|p| p.display().to_string()),
            loaded_at: store.loaded_at(),
        }
    }
}

fn no_information_response(query: &str) -> QueryResponse {
    QueryResponse {
        query: query.to_string(),
        answer: composer::NO_INFORMATION_MESSAGE.into(),
        source: Source::None,
        confidence: Confidence::None,
        bytes: 0,
        truncated: None,
        matched_keywords: None,
        entries_combined: None,
        fallback: None,
        fallback_error: None,
        kb_entries: 0,
    }
}
