//! Shared-link domain module.
//!
//! - `platform`: supported platforms and their URL markers
//! - `classifier`: URL classification and canonical URL extraction
//! - `event`: incoming share events, extraction requests and outcomes
//! - `source`: port for platform deep-link delivery

mod classifier;
mod event;
mod platform;
mod source;

pub use classifier::{UrlClassifier, extract_first_url, extract_shared_text};
pub use event::{ExtractionOutcome, ExtractionRequest, IncomingShareEvent};
pub use platform::Platform;
pub use source::{DeepLinkSource, LinkSubscription, SubscriptionId};
