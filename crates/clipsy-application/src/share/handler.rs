//! Share ingestion controller.
//!
//! `ShareHandler` owns the app's registration for incoming URLs. It is
//! constructed by the composition root and driven through `initialize`
//! (app mount) and `cleanup` (app unmount).

use std::sync::Arc;

use clipsy_core::error::Result;
use clipsy_core::share::{DeepLinkSource, IncomingShareEvent, LinkSubscription, SubscriptionId};
use tokio::sync::{Mutex, mpsc};
use tokio::task::{JoinHandle, JoinSet};

use super::pipeline::SharePipeline;

const TEST_SHARE_URL: &str = "https://www.instagram.com/reel/test123/";

struct ActiveSubscription {
    id: SubscriptionId,
    listener: JoinHandle<()>,
}

pub struct ShareHandler {
    source: Arc<dyn DeepLinkSource>,
    pipeline: Arc<SharePipeline>,
    active: Mutex<Option<ActiveSubscription>>,
}

impl ShareHandler {
    pub fn new(source: Arc<dyn DeepLinkSource>, pipeline: Arc<SharePipeline>) -> Self {
        Self {
            source,
            pipeline,
            active: Mutex::new(None),
        }
    }

    /// Registers for incoming URLs and processes the launch URL, if any.
    ///
    /// Calling this again tears the previous registration down first, so at
    /// most one registration is ever live.
    pub async fn initialize(&self) -> Result<()> {
        {
            let mut active = self.active.lock().await;
            if let Some(stale) = active.take() {
                tracing::debug!("[ShareHandler] Replacing stale subscription {:?}", stale.id);
                self.teardown(stale).await;
            }

            let LinkSubscription { id, events } = self.source.subscribe()?;
            let listener = tokio::spawn(listen(events, Arc::clone(&self.pipeline)));
            *active = Some(ActiveSubscription { id, listener });
            tracing::info!("[ShareHandler] Listening for incoming URLs ({:?})", id);
        }

        match self.source.initial_url().await {
            Ok(Some(url)) => {
                tracing::info!("[ShareHandler] Initial URL: {}", url);
                self.pipeline.handle(IncomingShareEvent::new(url)).await;
            }
            Ok(None) => {}
            Err(err) => tracing::warn!("[ShareHandler] Could not read initial URL: {}", err),
        }

        Ok(())
    }

    /// Releases the registration. Safe to call when not initialized.
    ///
    /// Submissions already in flight run to completion before this returns.
    pub async fn cleanup(&self) {
        let active = self.active.lock().await.take();
        if let Some(active) = active {
            tracing::info!("[ShareHandler] Cleaning up subscription {:?}", active.id);
            self.teardown(active).await;
        }
    }

    pub async fn is_initialized(&self) -> bool {
        self.active.lock().await.is_some()
    }

    /// Called when the app returns to the foreground: re-checks the launch
    /// URL and submits it if it is a supported content URL.
    pub async fn on_app_active(&self) {
        match self.source.initial_url().await {
            Ok(Some(url)) if self.pipeline.classifier().is_supported_content_url(&url) => {
                tracing::info!("[ShareHandler] Shared content on resume: {}", url);
                let _ = self.pipeline.submitter().submit(&url).await;
            }
            Ok(_) => {}
            Err(err) => tracing::debug!("[ShareHandler] No shared content found: {}", err),
        }
    }

    /// Submits a URL directly, bypassing classification.
    pub async fn test_share(&self, url: Option<&str>) {
        let url = url.unwrap_or(TEST_SHARE_URL);
        let _ = self.pipeline.submitter().submit(url).await;
    }

    /// Unsubscribing closes the event stream, which ends the listener once
    /// its in-flight pipelines are done.
    async fn teardown(&self, active: ActiveSubscription) {
        self.source.unsubscribe(active.id);
        if let Err(err) = active.listener.await {
            tracing::warn!("[ShareHandler] Listener ended abnormally: {}", err);
        }
    }
}

impl Drop for ShareHandler {
    fn drop(&mut self) {
        if let Some(active) = self.active.get_mut().take() {
            self.source.unsubscribe(active.id);
            active.listener.abort();
        }
    }
}

/// Listener loop: one pipeline task per delivered URL, spawned in delivery
/// order. Submissions may overlap; nothing is de-duplicated.
async fn listen(mut events: mpsc::UnboundedReceiver<String>, pipeline: Arc<SharePipeline>) {
    let mut in_flight = JoinSet::new();

    loop {
        tokio::select! {
            event = events.recv() => {
                let Some(raw) = event else { break };
                tracing::info!("[ShareHandler] Received URL: {}", raw);
                let pipeline = Arc::clone(&pipeline);
                in_flight.spawn(async move {
                    pipeline.handle(IncomingShareEvent::new(raw)).await;
                });
            }
            Some(_) = in_flight.join_next(), if !in_flight.is_empty() => {}
        }
    }

    tracing::debug!(
        "[ShareHandler] Event stream closed, waiting for {} submission(s)",
        in_flight.len()
    );
    while in_flight.join_next().await.is_some() {}
}
