//! Trickle configuration system.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Result, TrickleError};

/// Characters reserved for the truncation marker when the size cap kicks in.
pub const TRUNCATION_RESERVE: usize = 50;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrickleConfig {
    #[serde(default)]
    pub assistant: AssistantConfig,
    #[serde(default)]
    pub knowledge: KnowledgeConfig,
    #[serde(default)]
    pub web: WebConfig,
    #[serde(default)]
    pub gateway: GatewayConfig,
}

impl TrickleConfig {
    /// Load config from `TRICKLE_CONFIG` or the default path (~/.trickle/config.toml).
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self> {
        let path = std::env::var("TRICKLE_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| Self::default_path());
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| TrickleError::Config(format!("Failed to read config: {e}")))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| TrickleError::Config(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to the given path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| TrickleError::Config(format!("Failed to serialize config: {e}")))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject values the assistant cannot operate with.
    pub fn validate(&self) -> Result<()> {
        let a = &self.assistant;
        if a.max_response_size_bytes <= TRUNCATION_RESERVE {
            return Err(TrickleError::Config(format!(
                "max_response_size_bytes must be greater than {TRUNCATION_RESERVE}"
            )));
        }
        if a.max_combined_entries == 0 {
            return Err(TrickleError::Config(
                "max_combined_entries must be at least 1".into(),
            ));
        }
        if a.web_search_timeout == 0 {
            return Err(TrickleError::Config(
                "web_search_timeout must be at least 1 second".into(),
            ));
        }
        let valid_threshold = |v: f64| v.is_finite() && v >= 0.0;
        if !valid_threshold(a.min_local_score) || !valid_threshold(a.high_confidence_threshold) {
            return Err(TrickleError::Config(
                "score thresholds must be non-negative numbers".into(),
            ));
        }
        Ok(())
    }

    /// Get the default config path.
    pub fn default_path() -> PathBuf {
        Self::home_dir().join("config.toml")
    }

    /// Get the Trickle home directory.
    pub fn home_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".trickle")
    }
}

/// Answer composition settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    #[serde(default = "default_max_response_size")]
    pub max_response_size_bytes: usize,
    #[serde(default = "bool_true")]
    pub enable_web_fallback: bool,
    /// Seconds.
    #[serde(default = "default_web_search_timeout")]
    pub web_search_timeout: u64,
    #[serde(default = "default_min_local_score")]
    pub min_local_score: f64,
    #[serde(default = "default_high_confidence")]
    pub high_confidence_threshold: f64,
    #[serde(default = "default_max_combined")]
    pub max_combined_entries: usize,
}

fn bool_true() -> bool { true }
fn default_max_response_size() -> usize { 10240 }
fn default_web_search_timeout() -> u64 { 5 }
fn default_min_local_score() -> f64 { 5.0 }
fn default_high_confidence() -> f64 { 15.0 }
fn default_max_combined() -> usize { 2 }

impl AssistantConfig {
    pub fn web_search_timeout(&self) -> Duration {
        Duration::from_secs(self.web_search_timeout)
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            max_response_size_bytes: default_max_response_size(),
            enable_web_fallback: true,
            web_search_timeout: default_web_search_timeout(),
            min_local_score: default_min_local_score(),
            high_confidence_threshold: default_high_confidence(),
            max_combined_entries: default_max_combined(),
        }
    }
}

/// Knowledge source settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeConfig {
    #[serde(default = "default_knowledge_path")]
    pub path: String,
}

fn default_knowledge_path() -> String { "~/.trickle/knowledge/data.txt".into() }

impl KnowledgeConfig {
    /// Path with `~` expanded.
    pub fn resolved_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.path).to_string())
    }
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self { path: default_knowledge_path() }
    }
}

/// Web fallback settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    /// "duckduckgo" or "static".
    #[serde(default = "default_web_provider")]
    pub provider: String,
    #[serde(default = "default_web_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Answer returned by the "static" provider.
    #[serde(default)]
    pub static_message: String,
}

fn default_web_provider() -> String { "duckduckgo".into() }
fn default_web_endpoint() -> String { "https://lite.duckduckgo.com/lite/".into() }
fn default_user_agent() -> String { "Mozilla/5.0 (compatible; LowBandwidthBot/1.0)".into() }

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            provider: default_web_provider(),
            endpoint: default_web_endpoint(),
            user_agent: default_user_agent(),
            static_message: String::new(),
        }
    }
}

/// Gateway configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String { "127.0.0.1".into() }
fn default_port() -> u16 { 8000 }

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TrickleConfig::default();
        assert_eq!(config.assistant.max_response_size_bytes, 10240);
        assert!(config.assistant.enable_web_fallback);
        assert_eq!(config.assistant.web_search_timeout(), Duration::from_secs(5));
        assert!((config.assistant.min_local_score - 5.0).abs() < f64::EPSILON);
        assert!((config.assistant.high_confidence_threshold - 15.0).abs() < f64::EPSILON);
        assert_eq!(config.assistant.max_combined_entries, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_toml() {
        let toml_str = r#"
            [assistant]
            max_response_size_bytes = 2048
            enable_web_fallback = false
            min_local_score = 7.5

            [knowledge]
            path = "/srv/kb/data.txt"
        "#;

        let config: TrickleConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.assistant.max_response_size_bytes, 2048);
        assert!(!config.assistant.enable_web_fallback);
        assert!((config.assistant.min_local_score - 7.5).abs() < f64::EPSILON);
        assert_eq!(config.assistant.max_combined_entries, 2);
        assert_eq!(config.knowledge.resolved_path(), PathBuf::from("/srv/kb/data.txt"));
    }

    #[test]
    fn test_config_missing_fields_use_defaults() {
        let config: TrickleConfig = toml::from_str("").unwrap();
        assert_eq!(config.gateway.port, 8000);
        assert_eq!(config.web.endpoint, "https://lite.duckduckgo.com/lite/");
    }

    #[test]
    fn test_validate_rejects_tiny_size_cap() {
        let mut config = TrickleConfig::default();
        config.assistant.max_response_size_bytes = 50;
        assert!(matches!(config.validate(), Err(TrickleError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_zero_entries_and_timeout() {
        let mut config = TrickleConfig::default();
        config.assistant.max_combined_entries = 0;
        assert!(config.validate().is_err());

        let mut config = TrickleConfig::default();
        config.assistant.web_search_timeout = 0;
        assert!(config.validate().is_err());

        let mut config = TrickleConfig::default();
        config.assistant.min_local_score = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_load_roundtrip_file() {
        let path = std::env::temp_dir().join("trickle-test-config").join("config.toml");
        let mut config = TrickleConfig::default();
        config.gateway.port = 9123;
        config.save_to(&path).unwrap();

        let loaded = TrickleConfig::load_from(&path).unwrap();
        assert_eq!(loaded.gateway.port, 9123);
        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_load_from_validates() {
        let dir = std::env::temp_dir().join("trickle-test-invalid-config");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "[assistant]\nmax_combined_entries = 0\n").unwrap();

        let result = TrickleConfig::load_from(&path);
        assert!(matches!(result, Err(TrickleError::Config(ref m)) if m.contains("max_combined_entries")));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_home_dir() {
        let home = TrickleConfig::home_dir();
        assert!(home.to_string_lossy().contains("trickle"));
    }
}
