//! Application layer for Clipsy.
//!
//! This crate wires the domain ports from `clipsy-core` into the flows the
//! app runs: share ingestion, extraction submission, start-up session
//! refresh, sign-in/sign-out and recipe listing.

pub mod auth_usecase;
pub mod recipe_usecase;
pub mod session;
pub mod share;
pub mod submitter;

#[cfg(test)]
mod test_support;

pub use auth_usecase::AuthUseCase;
pub use recipe_usecase::RecipeUseCase;
pub use session::{RefreshState, SessionRefreshController};
pub use share::{ShareHandler, SharePipeline};
pub use submitter::ExtractionSubmitter;
