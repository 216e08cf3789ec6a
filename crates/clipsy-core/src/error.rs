//! Error types for the Clipsy application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire Clipsy application.
///
/// The variants follow the failure taxonomy of the share/extraction flow:
/// configuration problems fail fast, transport problems are transient,
/// backend failures carry the server message through, and parse failures
/// mean "not a relevant share" rather than a bug.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClipsyError {
    /// Required configuration (e.g. the backend base URL) is missing or invalid.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// No response was received: unreachable host, connection reset or timeout.
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered with an error status or reported a failure.
    #[error("Server error{}: {message}", status.map(|s| format!(" ({s})")).unwrap_or_default())]
    Server {
        status: Option<u16>,
        message: String,
    },

    /// The backend rejected the access token (HTTP 401).
    #[error("Session expired")]
    SessionExpired,

    /// No authenticated session is available for an authenticated call.
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Malformed shared text or URL.
    #[error("Parse error: {0}")]
    Parse(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },
}

impl ClipsyError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Creates a Network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a Server error
    pub fn server(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Server {
            status,
            message: message.into(),
        }
    }

    /// Creates a Parse error
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    pub fn is_server(&self) -> bool {
        matches!(self, Self::Server { .. })
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse(_))
    }

    /// Returns true if the user must sign in again before retrying.
    pub fn requires_sign_in(&self) -> bool {
        matches!(self, Self::SessionExpired | Self::NotAuthenticated)
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for ClipsyError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for ClipsyError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for ClipsyError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for ClipsyError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<url::ParseError> for ClipsyError {
    fn from(err: url::ParseError) -> Self {
        Self::Parse(err.to_string())
    }
}

/// A type alias for `Result<T, ClipsyError>`.
pub type Result<T> = std::result::Result<T, ClipsyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_display_with_status() {
        let err = ClipsyError::server(Some(500), "boom");
        assert_eq!(err.to_string(), "Server error (500): boom");
    }

    #[test]
    fn test_server_error_display_without_status() {
        let err = ClipsyError::server(None, "bad url");
        assert_eq!(err.to_string(), "Server error: bad url");
    }

    #[test]
    fn test_requires_sign_in() {
        assert!(ClipsyError::SessionExpired.requires_sign_in());
        assert!(ClipsyError::NotAuthenticated.requires_sign_in());
        assert!(!ClipsyError::network("offline").requires_sign_in());
    }

    #[test]
    fn test_from_url_parse_error_is_parse() {
        let err: ClipsyError = url::Url::parse("not a url").unwrap_err().into();
        assert!(err.is_parse());
    }
}
