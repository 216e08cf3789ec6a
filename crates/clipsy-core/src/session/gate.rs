//! Session gate for authenticated backend calls.

use super::store::SessionReader;

/// Outcome of a gate check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitPermission {
    /// The call may proceed with this bearer token.
    Allowed { access_token: String },
    /// No authenticated session is available.
    Denied,
}

impl SubmitPermission {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }

    pub fn token(&self) -> Option<&str> {
        match self {
            Self::Allowed { access_token } => Some(access_token),
            Self::Denied => None,
        }
    }
}

/// Decides whether an authenticated network call may proceed.
///
/// The check reads the live session every time it is called; nothing is
/// cached between calls.
#[derive(Debug, Clone)]
pub struct SessionGate {
    reader: SessionReader,
}

impl SessionGate {
    pub fn new(reader: SessionReader) -> Self {
        Self { reader }
    }

    pub fn can_submit(&self) -> SubmitPermission {
        let session = self.reader.snapshot();
        if !session.is_authenticated() {
            return SubmitPermission::Denied;
        }
        match session.access_token() {
            Some(token) if !token.is_empty() => SubmitPermission::Allowed {
                access_token: token.to_string(),
            },
            _ => SubmitPermission::Denied,
        }
    }
}
