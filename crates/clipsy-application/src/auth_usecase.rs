//! Sign-in, sign-out and session restore.

use std::sync::Arc;

use clipsy_core::backend::{LoginProfile, RecipeBackend};
use clipsy_core::error::Result;
use clipsy_core::session::{REFRESH_TOKEN_KEY, Session, SessionStore, User};
use clipsy_core::storage::KeyValueStore;

/// Use case for the sign-in/sign-out flows.
///
/// Together with [`crate::session::SessionRefreshController`] this is the only
/// writer of the [`SessionStore`]. Only the refresh token is persisted; the
/// access token lives in memory.
pub struct AuthUseCase {
    /// Owner of the process-wide session
    store: Arc<SessionStore>,
    /// Backend issuing tokens
    backend: Arc<dyn RecipeBackend>,
    /// Storage for the refresh token across restarts
    kv: Arc<dyn KeyValueStore>,
}

impl AuthUseCase {
    pub fn new(
        store: Arc<SessionStore>,
        backend: Arc<dyn RecipeBackend>,
        kv: Arc<dyn KeyValueStore>,
    ) -> Self {
        Self { store, backend, kv }
    }

    /// Signs in with an identity-provider profile and persists the refresh
    /// token. On error the current session is left untouched.
    pub async fn sign_in(&self, profile: &LoginProfile) -> Result<User> {
        tracing::info!("[AuthUseCase] Signing in {}", profile.email);
        let grant = self.backend.login(profile).await?;

        self.kv.set(REFRESH_TOKEN_KEY, &grant.refresh_token).await?;
        self.store.replace(Session::authenticated(
            grant.user.clone(),
            grant.access_token,
            grant.refresh_token,
        ));

        tracing::info!("[AuthUseCase] Signed in as {}", grant.user.id);
        Ok(grant.user)
    }

    /// Clears the session and forgets the persisted refresh token.
    pub async fn sign_out(&self) -> Result<()> {
        self.store.clear();
        self.kv.remove(REFRESH_TOKEN_KEY).await?;
        tracing::info!("[AuthUseCase] Signed out");
        Ok(())
    }

    /// Loads a persisted refresh token into an unauthenticated session so the
    /// refresh controller can pick it up. Returns whether a token was found.
    ///
    /// An already authenticated session is left alone.
    pub async fn restore_persisted(&self) -> Result<bool> {
        let Some(token) = self.kv.get(REFRESH_TOKEN_KEY).await? else {
            tracing::debug!("[AuthUseCase] No persisted session");
            return Ok(false);
        };
        if token.is_empty() {
            return Ok(false);
        }

        if self.store.snapshot().is_authenticated() {
            return Ok(true);
        }

        self.store.replace(Session::restored(token));
        tracing::debug!("[AuthUseCase] Restored persisted refresh token");
        Ok(true)
    }
}
