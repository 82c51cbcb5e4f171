//! # Trickle Knowledge Base
//!
//! Small, fixed, file-backed knowledge base with heuristic keyword scoring.
//! No index, no embeddings: every query scores every entry.
//!
//! ## How it works
//! ```text
//! data.txt ──loader──▶ EntryStore (immutable, Arc-shared)
//!                          │
//! query ──▶ scorer::score(query, entry) for every entry
//!                          │
//!            search::rank → drop score ≤ 0, stable sort, top-K
//! ```
//!
//! Reloading builds a fresh [`EntryStore`] and swaps it in through
//! [`KnowledgeBase`]; queries already running keep the old snapshot.

pub mod loader;
pub mod scorer;
pub mod search;
pub mod store;

pub use scorer::{Relevance, score};
pub use search::{ScoredEntry, rank};
pub use store::{EntryStore, KnowledgeBase};
