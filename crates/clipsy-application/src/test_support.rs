//! Hand-written fakes of the core ports for unit tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use clipsy_core::backend::{LoginProfile, RecipeBackend, TokenGrant};
use clipsy_core::error::{ClipsyError, Result};
use clipsy_core::notification::{Notice, Notifier};
use clipsy_core::recipe::Recipe;
use clipsy_core::session::User;
use clipsy_core::share::{
    DeepLinkSource, ExtractionOutcome, ExtractionRequest, LinkSubscription, SubscriptionId,
};
use tokio::sync::mpsc;

pub fn user() -> User {
    User {
        id: "u-1".to_string(),
        email: "cook@example.com".to_string(),
        name: "Cook".to_string(),
        profile_pic: None,
        created_at: None,
        updated_at: None,
    }
}

pub fn grant(access: &str, refresh: &str) -> TokenGrant {
    TokenGrant {
        access_token: access.to_string(),
        refresh_token: refresh.to_string(),
        user: user(),
    }
}

/// Backend whose answers are configured up front and which records calls.
pub struct MockBackend {
    pub extraction: Mutex<Result<ExtractionOutcome>>,
    pub refresh: Mutex<Result<TokenGrant>>,
    pub login: Mutex<Result<TokenGrant>>,
    pub recipes: Mutex<Result<Vec<Recipe>>>,
    pub submitted: Mutex<Vec<(String, String)>>,
    pub refresh_calls: Mutex<Vec<String>>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self {
            extraction: Mutex::new(Ok(ExtractionOutcome::Extracted {
                message: None,
                recipe_id: None,
            })),
            refresh: Mutex::new(Err(ClipsyError::server(Some(401), "revoked"))),
            login: Mutex::new(Err(ClipsyError::server(Some(500), "down"))),
            recipes: Mutex::new(Ok(Vec::new())),
            submitted: Mutex::new(Vec::new()),
            refresh_calls: Mutex::new(Vec::new()),
        }
    }
}

impl MockBackend {
    pub fn with_extraction(result: Result<ExtractionOutcome>) -> Self {
        Self {
            extraction: Mutex::new(result),
            ..Self::default()
        }
    }

    pub fn with_refresh(result: Result<TokenGrant>) -> Self {
        Self {
            refresh: Mutex::new(result),
            ..Self::default()
        }
    }

    pub fn submitted_urls(&self) -> Vec<String> {
        self.submitted
            .lock()
            .unwrap()
            .iter()
            .map(|(url, _)| url.clone())
            .collect()
    }
}

#[async_trait]
impl RecipeBackend for MockBackend {
    async fn submit_extraction(
        &self,
        request: &ExtractionRequest,
        access_token: &str,
    ) -> Result<ExtractionOutcome> {
        self.submitted
            .lock()
            .unwrap()
            .push((request.canonical_url.clone(), access_token.to_string()));
        self.extraction.lock().unwrap().clone()
    }

    async fn refresh_session(&self, refresh_token: &str) -> Result<TokenGrant> {
        self.refresh_calls
            .lock()
            .unwrap()
            .push(refresh_token.to_string());
        self.refresh.lock().unwrap().clone()
    }

    async fn login(&self, _profile: &LoginProfile) -> Result<TokenGrant> {
        self.login.lock().unwrap().clone()
    }

    async fn user_recipes(&self, _user_id: &str, _access_token: &str) -> Result<Vec<Recipe>> {
        self.recipes.lock().unwrap().clone()
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn titles(&self) -> Vec<String> {
        self.notices
            .lock()
            .unwrap()
            .iter()
            .map(|n| n.title.clone())
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

/// Link source that counts live registrations.
#[derive(Default)]
pub struct MockLinkSource {
    pub launch_url: Option<String>,
    next_id: Mutex<u64>,
    live: Mutex<HashMap<u64, mpsc::UnboundedSender<String>>>,
}

impl MockLinkSource {
    pub fn with_launch_url(url: &str) -> Self {
        Self {
            launch_url: Some(url.to_string()),
            ..Self::default()
        }
    }

    pub fn live_count(&self) -> usize {
        self.live.lock().unwrap().len()
    }

    /// Sends to the most recent live registration.
    pub fn emit(&self, url: &str) {
        let live = self.live.lock().unwrap();
        if let Some((_, sender)) = live.iter().max_by_key(|(id, _)| **id) {
            let _ = sender.send(url.to_string());
        }
    }
}

#[async_trait]
impl DeepLinkSource for MockLinkSource {
    fn subscribe(&self) -> Result<LinkSubscription> {
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        let (sender, events) = mpsc::unbounded_channel();
        self.live.lock().unwrap().insert(*next_id, sender);
        Ok(LinkSubscription {
            id: SubscriptionId(*next_id),
            events,
        })
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.live.lock().unwrap().remove(&id.0);
    }

    async fn initial_url(&self) -> Result<Option<String>> {
        Ok(self.launch_url.clone())
    }
}

/// Polls `condition` until it holds or two seconds pass.
pub async fn eventually<F: Fn() -> bool>(condition: F) -> bool {
    for _ in 0..200 {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    condition()
}
