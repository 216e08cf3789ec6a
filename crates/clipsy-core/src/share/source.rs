//! Port for platform deep-link delivery.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::Result;

/// Identifier of a live registration with a [`DeepLinkSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// A live registration for incoming-URL events.
///
/// URLs arrive on `events` in delivery order. The registration stays live
/// until [`DeepLinkSource::unsubscribe`] is called with `id`.
#[derive(Debug)]
pub struct LinkSubscription {
    pub id: SubscriptionId,
    pub events: mpsc::UnboundedReceiver<String>,
}

/// Source of URLs handed to the app by the platform.
#[async_trait]
pub trait DeepLinkSource: Send + Sync {
    /// Registers for incoming-URL events.
    fn subscribe(&self) -> Result<LinkSubscription>;

    /// Releases a registration and closes its event stream. Unknown ids are
    /// ignored.
    fn unsubscribe(&self, id: SubscriptionId);

    /// The URL that launched the app, if any.
    async fn initial_url(&self) -> Result<Option<String>>;
}
