//! Application configuration model.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ClipsyError, Result};
use crate::share::{Platform, UrlClassifier};

pub const DEFAULT_APP_SCHEME: &str = "clipsy";
pub const DEFAULT_EXTRACT_PATH: &str = "/extract-recipe";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// How incoming URLs are turned into content URLs.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IngestionStrategy {
    /// `<scheme>://share?url=...` deep links and direct content URLs,
    /// matched against `ShareConfig::platforms`.
    DeepLink,
    /// `text=` shares: the first embedded URL matching
    /// `ShareConfig::text_share_platforms`.
    TextShare,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ShareConfig {
    /// Enabled strategies. A text share is always routed to `TextShare`
    /// when that strategy is enabled.
    pub strategies: Vec<IngestionStrategy>,
    pub platforms: Vec<Platform>,
    pub text_share_platforms: Vec<Platform>,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            strategies: vec![IngestionStrategy::DeepLink, IngestionStrategy::TextShare],
            platforms: Platform::ALL.to_vec(),
            text_share_platforms: vec![Platform::Instagram],
        }
    }
}

impl ShareConfig {
    pub fn is_enabled(&self, strategy: IngestionStrategy) -> bool {
        self.strategies.contains(&strategy)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ClipsyConfig {
    /// Base URL of the extraction backend. `None` disables every network
    /// operation with a configuration error.
    pub backend_url: Option<String>,
    pub extract_path: String,
    pub request_timeout_secs: u64,
    pub app_scheme: String,
    pub share: ShareConfig,
}

impl Default for ClipsyConfig {
    fn default() -> Self {
        Self {
            backend_url: None,
            extract_path: DEFAULT_EXTRACT_PATH.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            app_scheme: DEFAULT_APP_SCHEME.to_string(),
            share: ShareConfig::default(),
        }
    }
}

impl ClipsyConfig {
    /// Returns the backend base URL or a configuration error.
    pub fn require_backend_url(&self) -> Result<&str> {
        self.backend_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| ClipsyError::configuration("backend URL is not configured"))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// Classifier for deep links and direct content URLs.
    pub fn classifier(&self) -> UrlClassifier {
        UrlClassifier::new(self.share.platforms.iter().copied(), self.app_scheme.clone())
    }
}
