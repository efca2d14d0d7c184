//! Service configuration types for Aura.
//!
//! `ServiceConfig` represents the top-level `config.toml` that controls
//! the HTTP listener, generation parameters, history retention, and
//! knowledge retrieval. Every field has a default so the service runs
//! with no config file at all.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Top-level configuration for the Aura service.
///
/// Loaded from `{data_dir}/config.toml` when present, then overridden by
/// environment variables in `aura-infra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub server: ServerConfig,
    pub cloud: CloudConfig,
    pub generation: GenerationConfig,
    pub memory: MemoryConfig,
    pub retrieval: RetrievalConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

/// Cloud project identity, logged at startup for traceability.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudConfig {
    pub project: String,
    pub location: String,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            project: default_project(),
            location: default_location(),
        }
    }
}

fn default_project() -> String {
    "aura-wellness".to_string()
}

fn default_location() -> String {
    "us-central1".to_string()
}

/// Generation parameters passed to the LLM provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Model identifier (e.g., "gemini-2.0-flash").
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_temperature() -> f64 {
    0.7
}

fn default_max_tokens() -> u32 {
    1024
}

/// Conversation history retention and prompt windowing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    /// Which history store backs conversations.
    pub backend: HistoryBackend,
    /// Trim history once it grows past this many messages.
    pub retention_ceiling: usize,
    /// After trimming, keep only the most recent this-many messages.
    pub retention_floor: usize,
    /// How many recent messages are replayed into each prompt.
    pub history_window: usize,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            backend: HistoryBackend::default(),
            retention_ceiling: default_retention_ceiling(),
            retention_floor: default_retention_floor(),
            history_window: default_history_window(),
        }
    }
}

fn default_retention_ceiling() -> usize {
    50
}

fn default_retention_floor() -> usize {
    30
}

fn default_history_window() -> usize {
    6
}

/// Knowledge base retrieval settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    pub enabled: bool,
    /// Number of nearest documents folded into the prompt.
    pub top_k: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            top_k: default_top_k(),
        }
    }
}

fn default_top_k() -> usize {
    2
}

/// Which store backs per-user conversation history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryBackend {
    #[default]
    Sqlite,
    Memory,
}

impl fmt::Display for HistoryBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryBackend::Sqlite => write!(f, "sqlite"),
            HistoryBackend::Memory => write!(f, "memory"),
        }
    }
}

impl FromStr for HistoryBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sqlite" => Ok(HistoryBackend::Sqlite),
            "memory" => Ok(HistoryBackend::Memory),
            other => Err(format!("invalid history backend: '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_config_default_values() {
        let config = ServiceConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.generation.model, "gemini-2.0-flash");
        assert!((config.generation.temperature - 0.7).abs() < f64::EPSILON);
        assert_eq!(config.generation.max_tokens, 1024);
        assert_eq!(config.memory.backend, HistoryBackend::Sqlite);
        assert_eq!(config.memory.retention_ceiling, 50);
        assert_eq!(config.memory.retention_floor, 30);
        assert_eq!(config.memory.history_window, 6);
        assert!(config.retrieval.enabled);
        assert_eq!(config.retrieval.top_k, 2);
    }

    #[test]
    fn test_service_config_deserialize_empty() {
        let config: ServiceConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.memory.retention_ceiling, 50);
    }

    #[test]
    fn test_service_config_deserialize_partial() {
        let toml_str = r#"
[server]
port = 9000

[generation]
model = "gemini-2.5-pro"

[memory]
backend = "memory"
retention_ceiling = 20
retention_floor = 10
"#;
        let config: ServiceConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.generation.model, "gemini-2.5-pro");
        assert_eq!(config.generation.max_tokens, 1024);
        assert_eq!(config.memory.backend, HistoryBackend::Memory);
        assert_eq!(config.memory.retention_ceiling, 20);
        assert_eq!(config.memory.retention_floor, 10);
    }

    #[test]
    fn test_history_backend_from_str() {
        assert_eq!("sqlite".parse::<HistoryBackend>(), Ok(HistoryBackend::Sqlite));
        assert_eq!("MEMORY".parse::<HistoryBackend>(), Ok(HistoryBackend::Memory));
        assert!("postgres".parse::<HistoryBackend>().is_err());
    }

    #[test]
    fn test_history_backend_display_roundtrip() {
        for backend in [HistoryBackend::Sqlite, HistoryBackend::Memory] {
            let parsed: HistoryBackend = backend.to_string().parse().unwrap();
            assert_eq!(parsed, backend);
        }
    }

    #[test]
    fn test_service_config_serde_roundtrip() {
        let config = ServiceConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: ServiceConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.server.port, config.server.port);
        assert_eq!(parsed.memory.backend, config.memory.backend);
    }
}
