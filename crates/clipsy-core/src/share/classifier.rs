//! URL classification and canonical URL extraction for shared content.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use super::platform::Platform;
use crate::error::{ClipsyError, Result};

static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    // A plain http(s) token: everything up to the next whitespace.
    Regex::new(r"https?://[^\s]+").expect("URL pattern is a valid regex")
});

/// Query parameter carrying the payload of a text share
/// (`...?text=<percent-encoded text>`).
const TEXT_SHARE_PARAM: &str = "text";

/// Path (or host) of the app's share deep link: `<scheme>://share?url=...`.
const SHARE_ROUTE: &str = "share";

/// Decides whether a string is a supported content URL and pulls canonical
/// URLs out of shared input.
///
/// The supported platform set is configuration; no URL-syntax validation is
/// performed on candidates.
#[derive(Debug, Clone)]
pub struct UrlClassifier {
    platforms: Vec<Platform>,
    scheme: String,
}

impl UrlClassifier {
    pub fn new(platforms: impl IntoIterator<Item = Platform>, scheme: impl Into<String>) -> Self {
        Self {
            platforms: platforms.into_iter().collect(),
            scheme: scheme.into(),
        }
    }

    /// Returns a classifier with the same scheme but a narrower platform set.
    pub fn restricted_to(&self, platforms: impl IntoIterator<Item = Platform>) -> Self {
        Self::new(platforms, self.scheme.clone())
    }

    /// True iff `candidate` contains one of the configured platform markers.
    pub fn is_supported_content_url(&self, candidate: &str) -> bool {
        self.platforms.iter().any(|platform| platform.matches(candidate))
    }

    /// True if `input` uses this app's custom URL scheme.
    pub fn is_app_link(&self, input: &str) -> bool {
        input
            .strip_prefix(self.scheme.as_str())
            .is_some_and(|rest| rest.starts_with("://"))
    }

    /// Extracts the canonical URL from shared input.
    ///
    /// App deep links (`<scheme>://share?url=<encoded>`) yield their decoded
    /// `url` parameter; any other input yields its first `http(s)://` token.
    /// `Ok(None)` means nothing to extract, which callers treat as "ignore".
    pub fn extract_canonical_url(&self, shared_text: &str) -> Result<Option<String>> {
        if self.is_app_link(shared_text) {
            return self.extract_from_app_link(shared_text);
        }
        Ok(extract_first_url(shared_text))
    }

    /// Decodes the `url` parameter of a `<scheme>://share?url=...` deep link.
    pub fn extract_from_app_link(&self, link: &str) -> Result<Option<String>> {
        let parsed = Url::parse(link)?;
        let on_share_route = parsed.host_str() == Some(SHARE_ROUTE)
            || parsed.path().trim_matches('/') == SHARE_ROUTE;
        if !on_share_route {
            return Ok(None);
        }

        Ok(parsed
            .query_pairs()
            .find(|(key, _)| key == "url")
            .map(|(_, value)| value.into_owned())
            .filter(|value| !value.is_empty()))
    }

    /// Returns the first URL in `text` that is a supported content URL.
    pub fn first_supported_url(&self, text: &str) -> Option<String> {
        URL_PATTERN
            .find_iter(text)
            .map(|m| m.as_str())
            .find(|candidate| self.is_supported_content_url(candidate))
            .map(str::to_string)
    }
}

impl Default for UrlClassifier {
    fn default() -> Self {
        Self::new(Platform::ALL, crate::config::DEFAULT_APP_SCHEME)
    }
}

/// Returns the first `http(s)://` token in `text`. First match wins.
pub fn extract_first_url(text: &str) -> Option<String> {
    URL_PATTERN.find(text).map(|m| m.as_str().to_string())
}

/// Pulls the percent-decoded shared text out of a text share URL.
///
/// Only a query parameter named exactly `text` counts, so keys that merely
/// end in `text` (`context=feed`) are not mistaken for a text share.
/// Returns `Ok(None)` when no such parameter is present and
/// `Err(ClipsyError::Parse)` when the payload cannot be decoded.
pub fn extract_shared_text(raw: &str) -> Result<Option<String>> {
    let Some(encoded) = shared_text_param(raw) else {
        return Ok(None);
    };

    let decoded = urlencoding::decode(encoded)
        .map_err(|e| ClipsyError::parse(format!("invalid shared text encoding: {e}")))?;
    Ok(Some(decoded.into_owned()))
}

/// Raw (still encoded) value of the first `text` query parameter.
fn shared_text_param(raw: &str) -> Option<&str> {
    let (_, query) = raw.split_once('?')?;
    let query = query.split('#').next().unwrap_or_default();
    query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        (key == TEXT_SHARE_PARAM).then_some(value)
    })
}
