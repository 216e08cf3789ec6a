//! Key-value store implementations.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use async_trait::async_trait;
use clipsy_core::error::Result;
use clipsy_core::storage::KeyValueStore;
use tokio::sync::Mutex;

use super::atomic_toml::AtomicTomlFile;
use crate::paths::ClipsyPaths;

/// Key-value store persisted as one TOML table (`storage.toml`).
pub struct TomlKeyValueStore {
    file: AtomicTomlFile<BTreeMap<String, String>>,
    // Serializes read-modify-write cycles within this process.
    write_guard: Mutex<()>,
}

impl TomlKeyValueStore {
    /// Creates a store at the default location (`~/.config/clipsy/storage.toml`).
    pub fn new_default() -> Result<Self> {
        Ok(Self::with_path(ClipsyPaths::storage_file()?))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: AtomicTomlFile::new(path),
            write_guard: Mutex::new(()),
        }
    }
}

#[async_trait]
impl KeyValueStore for TomlKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let table = self.file.load()?.unwrap_or_default();
        Ok(table.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.write_guard.lock().await;
        tracing::debug!("[TomlKeyValueStore] set key={}", key);
        self.file.update(BTreeMap::new(), |table| {
            table.insert(key.to_string(), value.to_string());
        })
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let _guard = self.write_guard.lock().await;
        tracing::debug!("[TomlKeyValueStore] remove key={}", key);
        self.file.update(BTreeMap::new(), |table| {
            table.remove(key);
        })
    }
}

/// Volatile store for tests and runs that must not touch disk.
#[derive(Default)]
pub struct InMemoryKeyValueStore {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.to_string(), value.to_string());
        Self {
            entries: Mutex::new(entries),
        }
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.entries.lock().await.remove(key);
        Ok(())
    }
}
