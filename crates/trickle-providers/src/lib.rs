//! # Trickle Providers
//!
//! Fallback providers consulted when the local knowledge base has no
//! confident answer. Markup scraping stays inside each provider; callers
//! only see [`FallbackOutcome`](trickle_core::traits::FallbackOutcome).

pub mod duckduckgo;
pub mod static_answer;

use std::sync::Arc;
use trickle_core::config::TrickleConfig;
use trickle_core::error::{Result, TrickleError};
use trickle_core::traits::FallbackProvider;

/// Create the configured fallback provider, or `None` when web fallback
/// is disabled.
pub fn create_fallback(config: &TrickleConfig) -> Result<Option<Arc<dyn FallbackProvider>>> {
    if !config.assistant.enable_web_fallback {
        return Ok(None);
    }

    match config.web.provider.as_str() {
        "duckduckgo" => Ok(Some(Arc::new(duckduckgo::DuckDuckGoLite::new(
            &config.web,
            config.assistant.web_search_timeout(),
            config.assistant.max_response_size_bytes,
        )?))),
        "static" => Ok(Some(Arc::new(static_answer::StaticAnswer::new(
            &config.web.static_message,
        )))),
        other => Err(TrickleError::Config(format!(
            "Unknown web provider: {other} (available: {})",
            available_providers().join(", ")
        ))),
    }
}

/// List all available provider names.
pub fn available_providers() -> Vec<&'static str> {
    vec!["duckduckgo", "static"]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_fallback_is_none() {
        let mut config = TrickleConfig::default();
        config.assistant.enable_web_fallback = false;
        assert!(create_fallback(&config).unwrap().is_none());
    }

    #[test]
    fn test_create_known_providers() {
        let config = TrickleConfig::default();
        let provider = create_fallback(&config).unwrap().unwrap();
        assert_eq!(provider.name(), "duckduckgo");

        let mut config = TrickleConfig::default();
        config.web.provider = "static".into();
        let provider = create_fallback(&config).unwrap().unwrap();
        assert_eq!(provider.name(), "static");
    }

    #[test]
    fn test_unknown_provider_is_config_error() {
        let mut config = TrickleConfig::default();
        config.web.provider = "altavista".into();
        match create_fallback(&config) {
            Err(TrickleError::Config(msg)) => {
                assert!(msg.contains("altavista"));
                assert!(msg.contains("available: duckduckgo, static"));
            }
            other => panic!("expected config error, got {:?}", other.map(|p| p.is_some())),
        }
    }

    #[test]
    fn test_available_providers() {
        for name in available_providers() {
            let mut config = TrickleConfig::default();
            config.web.provider = name.into();
            assert!(create_fallback(&config).is_ok());
        }
    }
}
