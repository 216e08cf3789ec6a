//! Persisted key-value store trait.

use async_trait::async_trait;

use crate::error::Result;

/// String key-value storage that survives process restarts.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes a key. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}
