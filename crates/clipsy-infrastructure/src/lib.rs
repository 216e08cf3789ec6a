//! Infrastructure adapters for Clipsy: configuration loading, persisted
//! key-value storage and in-process deep-link delivery.

pub mod config_service;
pub mod link_source;
pub mod paths;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::link_source::ChannelLinkSource;
pub use crate::paths::ClipsyPaths;
pub use crate::storage::{InMemoryKeyValueStore, TomlKeyValueStore};
