use std::sync::{Arc, Mutex};
use std::time::Duration;

use clipsy_application::{
    AuthUseCase, ExtractionSubmitter, RefreshState, SessionRefreshController, ShareHandler,
    SharePipeline,
};
use clipsy_core::config::ClipsyConfig;
use clipsy_core::notification::{Notice, Notifier};
use clipsy_core::session::{REFRESH_TOKEN_KEY, SessionGate, SessionStore};
use clipsy_core::storage::KeyValueStore;
use clipsy_infrastructure::{ChannelLinkSource, InMemoryKeyValueStore};
use clipsy_interaction::BackendClient;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Default)]
struct CollectingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl CollectingNotifier {
    fn titles(&self) -> Vec<String> {
        self.notices
            .lock()
            .unwrap()
            .iter()
            .map(|n| n.title.clone())
            .collect()
    }
}

impl Notifier for CollectingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

struct App {
    store: Arc<SessionStore>,
    kv: Arc<InMemoryKeyValueStore>,
    source: Arc<ChannelLinkSource>,
    notifier: Arc<CollectingNotifier>,
    auth: AuthUseCase,
    refresh: SessionRefreshController,
    handler: ShareHandler,
}

fn compose(server: &MockServer, kv: InMemoryKeyValueStore, launch_url: Option<&str>) -> App {
    let config = ClipsyConfig {
        backend_url: Some(server.uri()),
        ..ClipsyConfig::default()
    };
    let backend = Arc::new(BackendClient::from_config(&config).unwrap());
    let store = Arc::new(SessionStore::default());
    let kv = Arc::new(kv);
    let source = Arc::new(ChannelLinkSource::new(launch_url.map(str::to_string)));
    let notifier = Arc::new(CollectingNotifier::default());

    let submitter = Arc::new(ExtractionSubmitter::new(
        backend.clone(),
        SessionGate::new(store.reader()),
        notifier.clone(),
    ));
    let pipeline = Arc::new(SharePipeline::new(
        config.share.clone(),
        config.classifier(),
        submitter,
    ));

    App {
        auth: AuthUseCase::new(store.clone(), backend.clone(), kv.clone()),
        refresh: SessionRefreshController::new(store.clone(), backend, kv.clone()),
        handler: ShareHandler::new(source.clone(), pipeline),
        store,
        kv,
        source,
        notifier,
    }
}

fn refresh_ok(server_token: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "data": {
            "accessToken": "a2",
            "refreshToken": server_token,
            "user_data": { "id": "u-1", "email": "cook@example.com", "name": "Cook" }
        }
    }))
}

async fn wait_for_requests(server: &MockServer, count: usize) {
    for _ in 0..200 {
        let received = server.received_requests().await.unwrap_or_default();
        if received.len() >= count {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

#[tokio::test]
async fn test_restored_session_submits_shared_reel() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .and(query_param("refreshToken", "r1"))
        .respond_with(refresh_ok("r2"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/extract-recipe"))
        .and(header("authorization", "Bearer a2"))
        .and(body_json(json!({ "url": "https://instagram.com/reel/abc" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "success": true, "message": "Saved" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let app = compose(
        &server,
        InMemoryKeyValueStore::with_entry(REFRESH_TOKEN_KEY, "r1"),
        None,
    );

    assert!(app.auth.restore_persisted().await.unwrap());
    assert_eq!(app.refresh.run_once().await, RefreshState::Refreshed);
    assert_eq!(
        app.kv.get(REFRESH_TOKEN_KEY).await.unwrap().as_deref(),
        Some("r2")
    );

    app.handler.initialize().await.unwrap();
    assert_eq!(app.source.live_subscriptions(), 1);
    assert_eq!(
        app.source
            .deliver("clipsy://share?url=https%3A%2F%2Finstagram.com%2Freel%2Fabc"),
        1
    );

    wait_for_requests(&server, 2).await;
    for _ in 0..100 {
        if app.notifier.titles().contains(&"Success!".to_string()) {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(app.notifier.titles(), vec!["Processing", "Success!"]);

    app.handler.cleanup().await;
    assert_eq!(app.source.live_subscriptions(), 0);
}

#[tokio::test]
async fn test_revoked_refresh_token_signs_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let app = compose(
        &server,
        InMemoryKeyValueStore::with_entry(REFRESH_TOKEN_KEY, "stale"),
        Some("https://instagram.com/reel/abc"),
    );

    app.auth.restore_persisted().await.unwrap();
    assert_eq!(app.refresh.run_once().await, RefreshState::Failed);
    assert!(!app.store.snapshot().is_authenticated());
    assert!(app.store.snapshot().refresh_token().is_none());
    assert!(app.kv.get(REFRESH_TOKEN_KEY).await.unwrap().is_none());

    // The launch URL is still processed but the gate stops it.
    app.handler.initialize().await.unwrap();
    assert_eq!(app.notifier.titles(), vec!["Sign in required"]);
    let extract_calls = server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|request| request.url.path() == "/extract-recipe")
        .count();
    assert_eq!(extract_calls, 0);
}

#[tokio::test]
async fn test_expired_access_token_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "a1",
            "refresh_token": "r1",
            "user_data": { "id": "u-1", "email": "cook@example.com", "name": "Cook" }
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/extract-recipe"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let app = compose(&server, InMemoryKeyValueStore::new(), None);
    app.auth
        .sign_in(&clipsy_core::backend::LoginProfile {
            email: "cook@example.com".to_string(),
            name: "Cook".to_string(),
            photo: None,
        })
        .await
        .unwrap();

    app.handler.test_share(None).await;

    assert_eq!(app.notifier.titles(), vec!["Processing", "Session expired"]);
    // No refresh-and-retry on 401.
    assert!(app.store.snapshot().is_authenticated());
}
