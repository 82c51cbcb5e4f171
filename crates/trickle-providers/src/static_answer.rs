//! Static fallback: a fixed answer for offline deployments.

use async_trait::async_trait;
use trickle_core::traits::{FallbackOutcome, FallbackProvider};

pub struct StaticAnswer {
    message: String,
}

impl StaticAnswer {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.trim().to_string(),
        }
    }
}

#[async_trait]
impl FallbackProvider for StaticAnswer {
    fn name(&self) -> &str {
        "static"
    }

    async fn search(&self, _query: &str) -> FallbackOutcome {
        if self.message.is_empty() {
            FallbackOutcome::NoResults
        } else {
            FallbackOutcome::found(self.message.clone())
        }
    }
}
