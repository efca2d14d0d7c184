//! Service configuration loading.
//!
//! Reads `config.toml` from the Aura data directory (default `~/.aura`),
//! then lets environment variables override individual fields. Missing or
//! malformed files fall back to defaults rather than aborting startup.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use secrecy::SecretString;
use tracing::{debug, warn};

use aura_types::config::{HistoryBackend, ServiceConfig};

/// Resolve the Aura data directory.
///
/// Honors `AURA_DATA_DIR` when set, otherwise `~/.aura`. Falls back to a
/// relative `.aura` if no home directory can be determined (containers).
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("AURA_DATA_DIR") {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }
    match dirs::home_dir() {
        Some(home) => home.join(".aura"),
        None => PathBuf::from(".aura"),
    }
}

/// Load the service configuration from `{data_dir}/config.toml` and apply
/// environment variable overrides on top.
///
/// Returns the default configuration if the file does not exist or fails
/// to parse.
pub async fn load_service_config(data_dir: &Path) -> ServiceConfig {
    let mut config = load_config_file(data_dir).await;
    apply_env_overrides(&mut config);
    config
}

/// Read the Gemini API key from the `GEMINI_API_KEY` environment variable.
///
/// Returns `None` when the variable is unset or empty, which the caller
/// treats as "run without a provider".
pub fn gemini_api_key() -> Option<SecretString> {
    std::env::var("GEMINI_API_KEY")
        .ok()
        .filter(|key| !key.is_empty())
        .map(SecretString::from)
}

async fn load_config_file(data_dir: &Path) -> ServiceConfig {
    let path = data_dir.join("config.toml");

    let contents = match tokio::fs::read_to_string(&path).await {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no config.toml found, using defaults");
            return ServiceConfig::default();
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read config.toml, using defaults");
            return ServiceConfig::default();
        }
    };

    match toml::from_str::<ServiceConfig>(&contents) {
        Ok(config) => {
            debug!(path = %path.display(), "loaded configuration");
            config
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to parse config.toml, using defaults");
            ServiceConfig::default()
        }
    }
}

fn apply_env_overrides(config: &mut ServiceConfig) {
    if let Some(host) = env_value("HOST") {
        config.server.host = host;
    }
    if let Some(port) = env_value("PORT") {
        match port.parse::<u16>() {
            Ok(port) => config.server.port = port,
            Err(_) => warn!(value = %port, "ignoring invalid PORT override"),
        }
    }
    if let Some(project) = env_value("GOOGLE_CLOUD_PROJECT") {
        config.cloud.project = project;
    }
    if let Some(location) = env_value("GOOGLE_CLOUD_LOCATION") {
        config.cloud.location = location;
    }
    if let Some(model) = env_value("GEMINI_MODEL") {
        config.generation.model = model;
    }
    if let Some(backend) = env_value("AURA_HISTORY_BACKEND") {
        match HistoryBackend::from_str(&backend) {
            Ok(backend) => config.memory.backend = backend,
            Err(e) => warn!(error = %e, "ignoring invalid AURA_HISTORY_BACKEND override"),
        }
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}
