//! Start-up session refresh.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use clipsy_core::backend::RecipeBackend;
use clipsy_core::session::{REFRESH_TOKEN_KEY, Session, SessionStore};
use clipsy_core::storage::KeyValueStore;
use tokio::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshState {
    Idle,
    Refreshing,
    Refreshed,
    Failed,
}

/// Exchanges a restored refresh token for a full session, once per mount.
///
/// The transition `Idle -> Refreshing` is taken only when the session holds
/// a refresh token and is not authenticated. A failed refresh clears the
/// session entirely.
pub struct SessionRefreshController {
    store: Arc<SessionStore>,
    backend: Arc<dyn RecipeBackend>,
    kv: Arc<dyn KeyValueStore>,
    started: AtomicBool,
    state: Mutex<RefreshState>,
}

impl SessionRefreshController {
    pub fn new(
        store: Arc<SessionStore>,
        backend: Arc<dyn RecipeBackend>,
        kv: Arc<dyn KeyValueStore>,
    ) -> Self {
        Self {
            store,
            backend,
            kv,
            started: AtomicBool::new(false),
            state: Mutex::new(RefreshState::Idle),
        }
    }

    pub async fn state(&self) -> RefreshState {
        *self.state.lock().await
    }

    /// Runs the refresh if it is due. Later calls return the state reached
    /// by the first one without contacting the backend.
    pub async fn run_once(&self) -> RefreshState {
        if self.started.swap(true, Ordering::SeqCst) {
            return self.state().await;
        }

        let mut state = self.state.lock().await;
        let session = self.store.snapshot();
        let Some(refresh_token) = session.refresh_token().filter(|_| session.needs_refresh())
        else {
            tracing::debug!("[SessionRefresh] No refresh needed");
            return *state;
        };

        *state = RefreshState::Refreshing;
        tracing::info!("[SessionRefresh] Refreshing session");

        match self.backend.refresh_session(refresh_token).await {
            Ok(grant) => {
                self.store.replace(Session::authenticated(
                    grant.user,
                    grant.access_token,
                    grant.refresh_token.clone(),
                ));
                if let Err(err) = self.kv.set(REFRESH_TOKEN_KEY, &grant.refresh_token).await {
                    tracing::warn!("[SessionRefresh] Failed to persist refresh token: {}", err);
                }
                tracing::info!("[SessionRefresh] Session refreshed");
                *state = RefreshState::Refreshed;
            }
            Err(err) => {
                tracing::warn!("[SessionRefresh] Refresh failed, signing out: {}", err);
                self.store.clear();
                if let Err(err) = self.kv.remove(REFRESH_TOKEN_KEY).await {
                    tracing::warn!("[SessionRefresh] Failed to remove refresh token: {}", err);
                }
                *state = RefreshState::Failed;
            }
        }

        *state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockBackend, grant, user};
    use clipsy_core::error::ClipsyError;
    use clipsy_infrastructure::InMemoryKeyValueStore;

    struct Fixture {
        controller: SessionRefreshController,
        store: Arc<SessionStore>,
        backend: Arc<MockBackend>,
        kv: Arc<InMemoryKeyValueStore>,
    }

    impl Fixture {
        async fn persisted_token(&self) -> Option<String> {
            self.kv.get(REFRESH_TOKEN_KEY).await.unwrap()
        }
    }

    fn fixture(session: Session, backend: MockBackend) -> Fixture {
        let store = Arc::new(SessionStore::new(session));
        let backend = Arc::new(backend);
        let kv = Arc::new(InMemoryKeyValueStore::with_entry(REFRESH_TOKEN_KEY, "r1"));
        Fixture {
            controller: SessionRefreshController::new(store.clone(), backend.clone(), kv.clone()),
            store,
            backend,
            kv,
        }
    }

    #[tokio::test]
    async fn test_refresh_success_authenticates() {
        let f = fixture(
            Session::restored("r1"),
            MockBackend::with_refresh(Ok(grant("a2", "r2"))),
        );

        assert_eq!(f.controller.run_once().await, RefreshState::Refreshed);

        let session = f.store.snapshot();
        assert!(session.is_authenticated());
        assert_eq!(session.access_token(), Some("a2"));
        assert_eq!(session.refresh_token(), Some("r2"));
        assert_eq!(session.user(), Some(&user()));
        assert_eq!(*f.backend.refresh_calls.lock().unwrap(), vec!["r1"]);
        assert_eq!(f.persisted_token().await.as_deref(), Some("r2"));
    }

    #[tokio::test]
    async fn test_refresh_failure_clears_session() {
        let f = fixture(
            Session::restored("r1"),
            MockBackend::with_refresh(Err(ClipsyError::server(Some(401), "revoked"))),
        );

        assert_eq!(f.controller.run_once().await, RefreshState::Failed);

        let session = f.store.snapshot();
        assert_eq!(session, Session::signed_out());
        assert!(session.user().is_none());
        assert!(session.access_token().is_none());
        assert!(!session.is_authenticated());
        assert_eq!(f.persisted_token().await, None);
    }

    #[tokio::test]
    async fn test_network_failure_also_clears_session() {
        let f = fixture(
            Session::restored("r1"),
            MockBackend::with_refresh(Err(ClipsyError::network("offline"))),
        );
        assert_eq!(f.controller.run_once().await, RefreshState::Failed);
        assert_eq!(f.store.snapshot(), Session::signed_out());
    }

    #[tokio::test]
    async fn test_runs_at_most_once() {
        let f = fixture(
            Session::restored("r1"),
            MockBackend::with_refresh(Ok(grant("a2", "r2"))),
        );

        f.controller.run_once().await;
        f.store.replace(Session::restored("r2"));
        assert_eq!(f.controller.run_once().await, RefreshState::Refreshed);

        assert_eq!(f.backend.refresh_calls.lock().unwrap().len(), 1);
        assert!(!f.store.snapshot().is_authenticated());
    }

    #[tokio::test]
    async fn test_skipped_when_already_authenticated() {
        let signed_in = Session::authenticated(user(), "a1", "r1");
        let f = fixture(signed_in.clone(), MockBackend::default());

        assert_eq!(f.controller.run_once().await, RefreshState::Idle);
        assert!(f.backend.refresh_calls.lock().unwrap().is_empty());
        assert_eq!(f.store.snapshot(), signed_in);
    }

    #[tokio::test]
    async fn test_skipped_without_refresh_token() {
        let f = fixture(Session::signed_out(), MockBackend::default());
        assert_eq!(f.controller.run_once().await, RefreshState::Idle);
        assert_eq!(f.controller.state().await, RefreshState::Idle);
        assert!(f.backend.refresh_calls.lock().unwrap().is_empty());
    }
}
