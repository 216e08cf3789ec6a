//! Session domain model.

use serde::{Deserialize, Serialize};

/// A signed-in user as returned by the backend (`user_data`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub profile_pic: Option<String>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<String>,
    #[serde(rename = "updatedAt", default)]
    pub updated_at: Option<String>,
}

/// Authentication state of the current process.
///
/// Fields are private so the only way to obtain an authenticated session is
/// [`Session::authenticated`], which requires both tokens. This keeps
/// `is_authenticated() == true` implying that both tokens are present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user: Option<User>,
    access_token: Option<String>,
    refresh_token: Option<String>,
    is_authenticated: bool,
}

impl Session {
    /// A fully signed-out session: no user, no tokens.
    pub fn signed_out() -> Self {
        Self::default()
    }

    /// A session restored from persisted storage: only the refresh token is
    /// known, so the session is not authenticated until a refresh succeeds.
    pub fn restored(refresh_token: impl Into<String>) -> Self {
        Self {
            refresh_token: Some(refresh_token.into()),
            ..Self::default()
        }
    }

    /// A signed-in session after sign-in or a successful token refresh.
    pub fn authenticated(
        user: User,
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
    ) -> Self {
        Self {
            user: Some(user),
            access_token: Some(access_token.into()),
            refresh_token: Some(refresh_token.into()),
            is_authenticated: true,
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.id.as_str())
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    /// True when a refresh should be attempted: a refresh token exists but
    /// the session is not yet authenticated.
    pub fn needs_refresh(&self) -> bool {
        self.refresh_token.is_some() && !self.is_authenticated
    }
}
