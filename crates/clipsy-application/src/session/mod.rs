//! Session application services.
//!
//! This module contains the writer side of the session: the start-up refresh
//! controller. Sign-in and sign-out live in [`crate::AuthUseCase`].

mod refresh;

pub use refresh::{RefreshState, SessionRefreshController};
