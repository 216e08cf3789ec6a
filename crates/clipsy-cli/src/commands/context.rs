//! Composition root: builds every component from configuration.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clipsy_application::{
    AuthUseCase, ExtractionSubmitter, RecipeUseCase, RefreshState, SessionRefreshController,
    ShareHandler, SharePipeline,
};
use clipsy_core::config::ClipsyConfig;
use clipsy_core::session::{SessionGate, SessionStore};
use clipsy_infrastructure::{ChannelLinkSource, ConfigService, TomlKeyValueStore};
use clipsy_interaction::BackendClient;

use crate::console::ConsoleNotifier;

/// Global command-line options that affect composition.
pub struct ContextOptions {
    pub config_path: Option<PathBuf>,
    pub backend_url: Option<String>,
}

impl ContextOptions {
    pub fn load_config(&self) -> Result<ClipsyConfig> {
        let service = match &self.config_path {
            Some(path) => ConfigService::with_path(path.clone()),
            None => ConfigService::new(),
        };
        let mut config = service.load().context("Failed to load configuration")?;
        if let Some(url) = &self.backend_url {
            config.backend_url = Some(url.clone());
        }
        Ok(config)
    }
}

pub struct AppContext {
    pub config: ClipsyConfig,
    pub store: Arc<SessionStore>,
    pub source: Arc<ChannelLinkSource>,
    pub pipeline: Arc<SharePipeline>,
    pub handler: ShareHandler,
    pub auth: AuthUseCase,
    pub refresh: SessionRefreshController,
    pub recipes: RecipeUseCase,
}

impl AppContext {
    pub fn build(options: &ContextOptions, launch_url: Option<String>) -> Result<Self> {
        let config = options.load_config()?;
        if let Err(err) = config.require_backend_url() {
            tracing::warn!("[Clipsy] {}; network operations will fail", err);
        }

        let backend = Arc::new(
            BackendClient::from_config(&config).context("Failed to create backend client")?,
        );
        let kv = Arc::new(TomlKeyValueStore::new_default().context("Failed to open storage")?);
        let store = Arc::new(SessionStore::default());
        let source = Arc::new(ChannelLinkSource::new(launch_url));
        let notifier = Arc::new(ConsoleNotifier);

        let submitter = Arc::new(ExtractionSubmitter::new(
            backend.clone(),
            SessionGate::new(store.reader()),
            notifier,
        ));
        let pipeline = Arc::new(SharePipeline::new(
            config.share.clone(),
            config.classifier(),
            submitter,
        ));

        Ok(Self {
            handler: ShareHandler::new(source.clone(), pipeline.clone()),
            auth: AuthUseCase::new(store.clone(), backend.clone(), kv.clone()),
            refresh: SessionRefreshController::new(store.clone(), backend.clone(), kv),
            recipes: RecipeUseCase::new(backend, store.reader()),
            config,
            store,
            source,
            pipeline,
        })
    }

    /// App mount: restores the persisted session and runs the one-shot
    /// refresh.
    pub async fn start_session(&self) -> Result<RefreshState> {
        self.auth.restore_persisted().await?;
        Ok(self.refresh.run_once().await)
    }
}
