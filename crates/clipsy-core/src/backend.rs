//! Port for the recipe extraction backend.
//!
//! Implemented over HTTP in `clipsy-interaction`; the application layer only
//! sees this trait so that tests can substitute a fake backend.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::recipe::Recipe;
use crate::session::User;
use crate::share::{ExtractionOutcome, ExtractionRequest};

/// Tokens and user data issued by sign-in or refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenGrant {
    pub access_token: String,
    pub refresh_token: String,
    pub user: User,
}

/// Profile handed over by the identity provider after a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginProfile {
    pub email: String,
    pub name: String,
    #[serde(rename = "profile_pic")]
    pub photo: Option<String>,
}

#[async_trait]
pub trait RecipeBackend: Send + Sync {
    /// Hands a URL to the extraction endpoint with a bearer token.
    ///
    /// A reported domain failure is `Ok(ExtractionOutcome::Rejected)`;
    /// transport and auth failures are errors.
    async fn submit_extraction(
        &self,
        request: &ExtractionRequest,
        access_token: &str,
    ) -> Result<ExtractionOutcome>;

    /// Exchanges a refresh token for a new token pair.
    async fn refresh_session(&self, refresh_token: &str) -> Result<TokenGrant>;

    /// Signs a user in with the identity-provider profile.
    async fn login(&self, profile: &LoginProfile) -> Result<TokenGrant>;

    /// Lists the recipes saved by a user.
    async fn user_recipes(&self, user_id: &str, access_token: &str) -> Result<Vec<Recipe>>;
}
