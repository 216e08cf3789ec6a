//! In-process deep-link delivery.
//!
//! [`ChannelLinkSource`] plays the role of the platform's URL-open event
//! stream: the host (the CLI reading stdin, a test) calls
//! [`ChannelLinkSource::deliver`] and every live subscriber receives the URL.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use clipsy_core::error::Result;
use clipsy_core::share::{DeepLinkSource, LinkSubscription, SubscriptionId};
use tokio::sync::mpsc;

#[derive(Default)]
struct Registry {
    next_id: u64,
    subscribers: HashMap<u64, mpsc::UnboundedSender<String>>,
}

#[derive(Default)]
pub struct ChannelLinkSource {
    launch_url: Option<String>,
    registry: Mutex<Registry>,
}

impl ChannelLinkSource {
    pub fn new(launch_url: Option<String>) -> Self {
        Self {
            launch_url,
            registry: Mutex::new(Registry::default()),
        }
    }

    /// Delivers a URL to every live subscriber. Returns how many received it.
    pub fn deliver(&self, url: impl Into<String>) -> usize {
        let url = url.into();
        let mut registry = self.registry();
        // Drop subscribers whose receiving side is gone.
        registry
            .subscribers
            .retain(|_, sender| sender.send(url.clone()).is_ok());
        registry.subscribers.len()
    }

    /// Number of live registrations.
    pub fn live_subscriptions(&self) -> usize {
        self.registry().subscribers.len()
    }

    fn registry(&self) -> MutexGuard<'_, Registry> {
        self.registry
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl DeepLinkSource for ChannelLinkSource {
    fn subscribe(&self) -> Result<LinkSubscription> {
        let (sender, events) = mpsc::unbounded_channel();
        let mut registry = self.registry();
        registry.next_id += 1;
        let id = registry.next_id;
        registry.subscribers.insert(id, sender);
        tracing::debug!("[ChannelLinkSource] subscribe id={}", id);
        Ok(LinkSubscription {
            id: SubscriptionId(id),
            events,
        })
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        if self.registry().subscribers.remove(&id.0).is_some() {
            tracing::debug!("[ChannelLinkSource] unsubscribe id={}", id.0);
        }
    }

    async fn initial_url(&self) -> Result<Option<String>> {
        Ok(self.launch_url.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_deliver_reaches_subscriber_in_order() {
        let source = ChannelLinkSource::new(None);
        let mut subscription = source.subscribe().unwrap();

        assert_eq!(source.deliver("https://a"), 1);
        assert_eq!(source.deliver("https://b"), 1);

        assert_eq!(subscription.events.recv().await.as_deref(), Some("https://a"));
        assert_eq!(subscription.events.recv().await.as_deref(), Some("https://b"));
    }

    #[test]
    fn test_unsubscribe_releases_registration() {
        let source = ChannelLinkSource::new(None);
        let first = source.subscribe().unwrap();
        let second = source.subscribe().unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(source.live_subscriptions(), 2);

        source.unsubscribe(first.id);
        source.unsubscribe(first.id);
        assert_eq!(source.live_subscriptions(), 1);
    }

    #[test]
    fn test_dropped_receiver_is_pruned_on_delivery() {
        let source = ChannelLinkSource::new(None);
        let subscription = source.subscribe().unwrap();
        drop(subscription);
        assert_eq!(source.deliver("https://a"), 0);
        assert_eq!(source.live_subscriptions(), 0);
    }

    #[tokio::test]
    async fn test_initial_url() {
        let source = ChannelLinkSource::new(Some("clipsy://share?url=x".to_string()));
        assert_eq!(
            source.initial_url().await.unwrap().as_deref(),
            Some("clipsy://share?url=x")
        );
    }
}
