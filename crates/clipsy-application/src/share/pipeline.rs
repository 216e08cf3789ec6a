//! Handling pipeline for a single incoming URL.

use std::sync::Arc;

use clipsy_core::config::{IngestionStrategy, ShareConfig};
use clipsy_core::error::Result;
use clipsy_core::share::{IncomingShareEvent, UrlClassifier, extract_shared_text};

use crate::submitter::ExtractionSubmitter;

/// Turns an incoming URL into at most one extraction submission.
pub struct SharePipeline {
    config: ShareConfig,
    classifier: UrlClassifier,
    text_classifier: UrlClassifier,
    submitter: Arc<ExtractionSubmitter>,
}

impl SharePipeline {
    pub fn new(
        config: ShareConfig,
        classifier: UrlClassifier,
        submitter: Arc<ExtractionSubmitter>,
    ) -> Self {
        let classifier = classifier.restricted_to(config.platforms.iter().copied());
        let text_classifier = classifier.restricted_to(config.text_share_platforms.iter().copied());
        Self {
            config,
            classifier,
            text_classifier,
            submitter,
        }
    }

    pub fn classifier(&self) -> &UrlClassifier {
        &self.classifier
    }

    pub fn submitter(&self) -> &ExtractionSubmitter {
        &self.submitter
    }

    /// Runs the pipeline for one event. Never fails: irrelevant input is
    /// ignored, parse failures are logged, and submission failures have
    /// already been reported to the user by the submitter.
    pub async fn handle(&self, event: IncomingShareEvent) {
        tracing::debug!(
            "[SharePipeline] Received {} at {}",
            event.raw_url,
            event.received_at.to_rfc3339()
        );

        match self.resolve(&event.raw_url) {
            Ok(Some(url)) => {
                tracing::info!("[SharePipeline] Processing shared content: {}", url);
                let _ = self.submitter.submit(&url).await;
            }
            Ok(None) => {
                tracing::debug!("[SharePipeline] Ignoring unsupported URL: {}", event.raw_url);
            }
            Err(err) => {
                tracing::warn!(
                    "[SharePipeline] Could not parse shared input {}: {}",
                    event.raw_url,
                    err
                );
            }
        }
    }

    /// Finds the content URL carried by `raw`, if any.
    pub fn resolve(&self, raw: &str) -> Result<Option<String>> {
        let raw = raw.trim();

        if self.config.is_enabled(IngestionStrategy::TextShare) {
            if let Some(text) = extract_shared_text(raw)? {
                return Ok(self.text_classifier.first_supported_url(&text));
            }
        }

        if !self.config.is_enabled(IngestionStrategy::DeepLink) {
            return Ok(None);
        }

        if self.classifier.is_app_link(raw) {
            let url = self.classifier.extract_from_app_link(raw)?;
            return Ok(url.filter(|url| self.classifier.is_supported_content_url(url)));
        }

        if self.classifier.is_supported_content_url(raw) {
            return Ok(Some(raw.to_string()));
        }

        Ok(None)
    }
}
