//! BackendClient - REST implementation of the recipe extraction backend.
//!
//! Endpoints (relative to the configured base URL):
//! - `POST {extract_path}` with `{ "url": ... }` and a bearer token
//! - `POST /auth/refresh?refreshToken=...`
//! - `POST /auth/login` with the identity-provider profile
//! - `GET /recipes/user/{user_id}` with a bearer token

use std::time::Duration;

use async_trait::async_trait;
use clipsy_core::backend::{LoginProfile, RecipeBackend, TokenGrant};
use clipsy_core::config::ClipsyConfig;
use clipsy_core::error::{ClipsyError, Result};
use clipsy_core::recipe::{Recipe, RecipeApiResponse};
use clipsy_core::session::User;
use clipsy_core::share::{ExtractionOutcome, ExtractionRequest};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

const REFRESH_PATH: &str = "/auth/refresh";
const LOGIN_PATH: &str = "/auth/login";
const GENERIC_SERVER_MESSAGE: &str = "Failed to extract content. Please try again.";

/// HTTP client for the extraction backend.
///
/// The base URL is optional so that a missing configuration surfaces as
/// [`ClipsyError::Configuration`] at call time, before any request is made.
#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: Option<String>,
    extract_path: String,
}

impl BackendClient {
    /// Fails with [`ClipsyError::Configuration`] when the HTTP client cannot
    /// be built with the requested timeouts.
    pub fn new(
        base_url: Option<String>,
        extract_path: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .timeout(timeout)
            .build()
            .map_err(|err| {
                ClipsyError::configuration(format!("failed to build HTTP client: {err}"))
            })?;

        let extract_path = extract_path.into();
        let extract_path = if extract_path.starts_with('/') {
            extract_path
        } else {
            format!("/{extract_path}")
        };

        Ok(Self {
            client,
            base_url: base_url.filter(|url| !url.trim().is_empty()),
            extract_path,
        })
    }

    pub fn from_config(config: &ClipsyConfig) -> Result<Self> {
        Self::new(
            config.backend_url.clone(),
            config.extract_path.clone(),
            config.request_timeout(),
        )
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    fn endpoint(&self, path: &str) -> Result<String> {
        let base = self
            .base_url
            .as_deref()
            .ok_or_else(|| ClipsyError::configuration("backend URL is not configured"))?;
        Ok(format!("{}{}", base.trim_end_matches('/'), path))
    }

    /// Appends `segments` to the base URL path, percent-encoding each one so
    /// that `/`, `?` or spaces in an identifier stay inside its segment.
    fn segment_endpoint(&self, segments: &[&str]) -> Result<String> {
        let mut url = Url::parse(&self.endpoint("")?)
            .map_err(|err| ClipsyError::configuration(format!("invalid backend URL: {err}")))?;
        url.path_segments_mut()
            .map_err(|_| ClipsyError::configuration("backend URL cannot carry a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url.into())
    }

    async fn send(&self, request: reqwest::RequestBuilder, what: &str) -> Result<Response> {
        let response = request.send().await.map_err(|err| map_transport_error(err, what))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        tracing::warn!("[BackendClient] {} failed with status {}", what, status);
        if status == StatusCode::UNAUTHORIZED {
            return Err(ClipsyError::SessionExpired);
        }

        let body = response.text().await.unwrap_or_default();
        Err(ClipsyError::server(Some(status.as_u16()), server_message(&body)))
    }
}

#[async_trait]
impl RecipeBackend for BackendClient {
    async fn submit_extraction(
        &self,
        request: &ExtractionRequest,
        access_token: &str,
    ) -> Result<ExtractionOutcome> {
        let url = self.endpoint(&self.extract_path)?;
        tracing::info!(
            "[BackendClient] Submitting {} for extraction",
            request.canonical_url
        );

        let response = self
            .send(
                self.client.post(&url).bearer_auth(access_token).json(request),
                "extraction",
            )
            .await?;
        let body: ExtractResponse = parse_json(response).await?;

        if body.success {
            Ok(ExtractionOutcome::Extracted {
                message: body.message,
                recipe_id: body.recipe_id,
            })
        } else {
            let message = body
                .message
                .or(body.error)
                .unwrap_or_else(|| "Extraction failed".to_string());
            tracing::info!("[BackendClient] Extraction rejected: {}", message);
            Ok(ExtractionOutcome::Rejected { message })
        }
    }

    async fn refresh_session(&self, refresh_token: &str) -> Result<TokenGrant> {
        let url = self.endpoint(REFRESH_PATH)?;
        tracing::info!("[BackendClient] Refreshing session");

        let response = self
            .send(
                self.client
                    .post(&url)
                    .query(&[("refreshToken", refresh_token)]),
                "refresh",
            )
            .await?;
        let body: RefreshResponse = parse_json(response).await?;

        Ok(TokenGrant {
            access_token: body.data.access_token,
            refresh_token: body.data.refresh_token,
            user: body.data.user_data,
        })
    }

    async fn login(&self, profile: &LoginProfile) -> Result<TokenGrant> {
        let url = self.endpoint(LOGIN_PATH)?;
        tracing::info!("[BackendClient] Signing in {}", profile.email);

        let response = self
            .send(self.client.post(&url).json(profile), "login")
            .await?;
        let body: LoginResponse = parse_json(response).await?;

        Ok(TokenGrant {
            access_token: body.access_token,
            refresh_token: body.refresh_token,
            user: body.user_data,
        })
    }

    async fn user_recipes(&self, user_id: &str, access_token: &str) -> Result<Vec<Recipe>> {
        let url = self.segment_endpoint(&["recipes", "user", user_id])?;

        let response = self
            .send(
                self.client.get(&url).bearer_auth(access_token),
                "recipe listing",
            )
            .await?;
        let status = response.status().as_u16();
        let body: RecipeApiResponse = parse_json(response).await?;

        if !body.success {
            let message = body
                .error
                .or(body.message)
                .unwrap_or_else(|| "Failed to fetch recipes".to_string());
            return Err(ClipsyError::server(Some(status), message));
        }

        Ok(body.recipe_data.map(|data| data.recipes).unwrap_or_default())
    }
}

#[derive(Deserialize)]
struct ExtractResponse {
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    recipe_id: Option<String>,
}

#[derive(Deserialize)]
struct RefreshResponse {
    data: RefreshData,
}

#[derive(Deserialize)]
struct RefreshData {
    #[serde(rename = "accessToken")]
    access_token: String,
    #[serde(rename = "refreshToken")]
    refresh_token: String,
    user_data: User,
}

#[derive(Deserialize)]
struct LoginResponse {
    access_token: String,
    refresh_token: String,
    user_data: User,
}

#[derive(Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status().as_u16();
    response.json::<T>().await.map_err(|err| {
        if err.is_timeout() {
            return ClipsyError::network(format!("timed out reading response: {err}"));
        }
        tracing::warn!("[BackendClient] Invalid response body: {}", err);
        ClipsyError::server(Some(status), "Invalid response from server")
    })
}

fn map_transport_error(err: reqwest::Error, what: &str) -> ClipsyError {
    tracing::warn!("[BackendClient] {} request failed: {}", what, err);
    if err.is_builder() {
        return ClipsyError::configuration(format!("invalid backend URL: {err}"));
    }
    if err.is_timeout() {
        return ClipsyError::network(format!("{what} request timed out"));
    }
    ClipsyError::network(format!("{what} request failed: {err}"))
}

/// Picks the server-provided message out of an error body, if any.
fn server_message(body: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(|parsed| parsed.message.or(parsed.error))
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| GENERIC_SERVER_MESSAGE.to_string())
}
