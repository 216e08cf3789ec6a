//! Submission of validated URLs to the extraction backend.

use std::sync::Arc;

use clipsy_core::backend::RecipeBackend;
use clipsy_core::error::{ClipsyError, Result};
use clipsy_core::notification::{Notice, Notifier};
use clipsy_core::session::{SessionGate, SubmitPermission};
use clipsy_core::share::{ExtractionOutcome, ExtractionRequest};

const DEFAULT_SUCCESS_MESSAGE: &str = "Content extracted successfully!";

/// Gates, submits and reports one extraction per call.
///
/// Exactly one backend call is made per invocation and nothing is retried.
/// A 401 surfaces as "session expired" without attempting a refresh.
pub struct ExtractionSubmitter {
    backend: Arc<dyn RecipeBackend>,
    gate: SessionGate,
    notifier: Arc<dyn Notifier>,
}

impl ExtractionSubmitter {
    pub fn new(
        backend: Arc<dyn RecipeBackend>,
        gate: SessionGate,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            backend,
            gate,
            notifier,
        }
    }

    /// Submits `canonical_url` and notifies the user of the result.
    ///
    /// The result is returned for callers that want it; every failure has
    /// already been reported to the user.
    pub async fn submit(&self, canonical_url: &str) -> Result<ExtractionOutcome> {
        let result = self.try_submit(canonical_url).await;

        match &result {
            Ok(ExtractionOutcome::Extracted { message, .. }) => {
                tracing::info!("[Submitter] Extracted {}", canonical_url);
                let message = message
                    .clone()
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_SUCCESS_MESSAGE.to_string());
                self.notifier.notify(Notice::success("Success!", message));
            }
            Ok(ExtractionOutcome::Rejected { message }) => {
                tracing::info!("[Submitter] Backend rejected {}: {}", canonical_url, message);
                self.notifier
                    .notify(Notice::error("Extraction failed", message.clone()));
            }
            Err(err) => {
                tracing::warn!("[Submitter] Submission of {} failed: {}", canonical_url, err);
                self.notifier.notify(Notice::from_error(err));
            }
        }

        result
    }

    async fn try_submit(&self, canonical_url: &str) -> Result<ExtractionOutcome> {
        // Evaluated now, not when the share event arrived.
        let access_token = match self.gate.can_submit() {
            SubmitPermission::Allowed { access_token } => access_token,
            SubmitPermission::Denied => return Err(ClipsyError::NotAuthenticated),
        };

        self.notifier.notify(Notice::processing());

        let request = ExtractionRequest::new(canonical_url);
        self.backend
            .submit_extraction(&request, &access_token)
            .await
    }
}
