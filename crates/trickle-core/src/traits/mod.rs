//! Trait seams between the assistant core and its collaborators.

pub mod fallback;

pub use fallback::{FallbackOutcome, FallbackProvider, FallbackReply};
