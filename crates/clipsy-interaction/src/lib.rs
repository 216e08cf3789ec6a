//! HTTP interaction with the Clipsy backend.

pub mod backend_client;

pub use backend_client::BackendClient;
