//! File-backed storage.

mod atomic_toml;
mod key_value;

pub use atomic_toml::AtomicTomlFile;
pub use key_value::{InMemoryKeyValueStore, TomlKeyValueStore};
