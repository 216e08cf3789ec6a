//! Share events and extraction requests.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A URL delivered by the platform (deep link, share intent or launch URL).
///
/// Created per delivery and consumed immediately; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingShareEvent {
    pub raw_url: String,
    pub received_at: DateTime<Utc>,
}

impl IncomingShareEvent {
    pub fn new(raw_url: impl Into<String>) -> Self {
        Self {
            raw_url: raw_url.into(),
            received_at: Utc::now(),
        }
    }
}

/// A validated URL on its way to the extraction backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionRequest {
    #[serde(rename = "url")]
    pub canonical_url: String,
    #[serde(skip)]
    pub submitted_at: DateTime<Utc>,
}

impl ExtractionRequest {
    pub fn new(canonical_url: impl Into<String>) -> Self {
        Self {
            canonical_url: canonical_url.into(),
            submitted_at: Utc::now(),
        }
    }
}

/// Result of a completed extraction call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionOutcome {
    /// The backend accepted and processed the URL.
    Extracted {
        message: Option<String>,
        recipe_id: Option<String>,
    },
    /// The backend answered but reported a domain failure.
    Rejected { message: String },
}

impl ExtractionOutcome {
    pub fn is_extracted(&self) -> bool {
        matches!(self, Self::Extracted { .. })
    }
}
