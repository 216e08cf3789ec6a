//! Configuration service implementation.
//!
//! Loads [`ClipsyConfig`] from `~/.config/clipsy/config.toml` (or an explicit
//! path) and applies environment overrides on top.

use std::env;
use std::path::PathBuf;

use clipsy_core::config::ClipsyConfig;
use clipsy_core::error::{ClipsyError, Result};

use crate::paths::ClipsyPaths;
use crate::storage::AtomicTomlFile;

pub const ENV_BACKEND_URL: &str = "CLIPSY_BACKEND_URL";
/// Name used by the mobile build; honoured when `CLIPSY_BACKEND_URL` is unset.
pub const ENV_BACKEND_URL_FALLBACK: &str = "EXPO_PUBLIC_BACKEND_URL";
pub const ENV_EXTRACT_PATH: &str = "CLIPSY_EXTRACT_PATH";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "CLIPSY_REQUEST_TIMEOUT_SECS";

#[derive(Debug, Clone)]
pub struct ConfigService {
    path: Option<PathBuf>,
}

impl ConfigService {
    /// Uses the default config file location.
    pub fn new() -> Self {
        Self { path: None }
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path: Some(path) }
    }

    /// Loads the file (defaults when missing) and applies process env overrides.
    pub fn load(&self) -> Result<ClipsyConfig> {
        let config = self.load_file()?;
        Ok(apply_env_overrides(config, |key| env::var(key).ok()))
    }

    fn load_file(&self) -> Result<ClipsyConfig> {
        let path = match &self.path {
            Some(path) => path.clone(),
            None => match ClipsyPaths::config_file() {
                Ok(path) => path,
                Err(e) => {
                    tracing::warn!("[ConfigService] {}; using defaults", e);
                    return Ok(ClipsyConfig::default());
                }
            },
        };

        let config = AtomicTomlFile::<ClipsyConfig>::new(path.clone())
            .load()
            .map_err(|e| {
                ClipsyError::configuration(format!("failed to read {}: {e}", path.display()))
            })?;

        match config {
            Some(config) => {
                tracing::debug!("[ConfigService] Loaded {}", path.display());
                Ok(config)
            }
            None => {
                tracing::debug!("[ConfigService] No config at {}, using defaults", path.display());
                Ok(ClipsyConfig::default())
            }
        }
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies environment overrides using `lookup` to read variables.
pub fn apply_env_overrides<F>(mut config: ClipsyConfig, lookup: F) -> ClipsyConfig
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(url) = non_empty(ENV_BACKEND_URL).or_else(|| non_empty(ENV_BACKEND_URL_FALLBACK)) {
        config.backend_url = Some(url);
    }
    if let Some(path) = non_empty(ENV_EXTRACT_PATH) {
        config.extract_path = path;
    }
    if let Some(raw) = non_empty(ENV_REQUEST_TIMEOUT_SECS) {
        match raw.trim().parse::<u64>() {
            Ok(secs) => config.request_timeout_secs = secs,
            Err(_) => tracing::warn!(
                "[ConfigService] Ignoring invalid {}={}",
                ENV_REQUEST_TIMEOUT_SECS,
                raw
            ),
        }
    }
    if config
        .backend_url
        .as_deref()
        .is_some_and(|url| url.trim().is_empty())
    {
        config.backend_url = None;
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::TempDir;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::with_path(temp_dir.path().join("config.toml"));
        let config = service.load_file().unwrap();
        assert_eq!(config, ClipsyConfig::default());
    }

    #[test]
    fn test_file_values_are_loaded() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(
            &path,
            "backend_url = \"https://api.example.com\"\nrequest_timeout_secs = 5\n",
        )
        .unwrap();

        let config = ConfigService::with_path(path).load_file().unwrap();
        assert_eq!(config.backend_url.as_deref(), Some("https://api.example.com"));
        assert_eq!(config.request_timeout_secs, 5);
    }

    #[test]
    fn test_invalid_file_is_configuration_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "backend_url = [").unwrap();

        let err = ConfigService::with_path(path).load_file().unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_env_overrides_file() {
        let config = apply_env_overrides(
            ClipsyConfig {
                backend_url: Some("https://file.example.com".to_string()),
                ..ClipsyConfig::default()
            },
            env_of(&[
                (ENV_BACKEND_URL, "https://env.example.com"),
                (ENV_EXTRACT_PATH, "/api/extract"),
                (ENV_REQUEST_TIMEOUT_SECS, "12"),
            ]),
        );
        assert_eq!(config.backend_url.as_deref(), Some("https://env.example.com"));
        assert_eq!(config.extract_path, "/api/extract");
        assert_eq!(config.request_timeout_secs, 12);
    }

    #[test]
    fn test_fallback_env_name() {
        let config = apply_env_overrides(
            ClipsyConfig::default(),
            env_of(&[(ENV_BACKEND_URL_FALLBACK, "https://expo.example.com")]),
        );
        assert_eq!(config.backend_url.as_deref(), Some("https://expo.example.com"));
    }

    #[test]
    fn test_blank_backend_url_is_absent() {
        let config = apply_env_overrides(
            ClipsyConfig {
                backend_url: Some("".to_string()),
                ..ClipsyConfig::default()
            },
            env_of(&[(ENV_REQUEST_TIMEOUT_SECS, "abc")]),
        );
        assert!(config.backend_url.is_none());
        assert_eq!(config.request_timeout_secs, 30);
    }
}
