//! Domain layer for Clipsy.
//!
//! Holds the session model and its single owner, the URL classifier used for
//! shared links, the recipe model, and the ports implemented by the
//! infrastructure and interaction crates.

pub mod backend;
pub mod config;
pub mod error;
pub mod notification;
pub mod recipe;
pub mod session;
pub mod share;
pub mod storage;

// Re-export common error type
pub use error::{ClipsyError, Result};
