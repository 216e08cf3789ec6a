//! Session domain module.
//!
//! # Module Structure
//!
//! - `model`: Session and user models (`Session`, `User`)
//! - `store`: single owner of the process-wide session (`SessionStore`, `SessionReader`)
//! - `gate`: authorization check for authenticated calls (`SessionGate`)

mod gate;
mod model;
mod store;

// Re-export public API
pub use gate::{SessionGate, SubmitPermission};
pub use model::{Session, User};
pub use store::{SessionReader, SessionStore};

/// Key under which the refresh token is persisted across restarts.
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";
