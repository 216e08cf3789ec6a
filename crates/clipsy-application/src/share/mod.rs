//! Share ingestion: the controller that owns the deep-link registration and
//! the per-URL handling pipeline it drives.

mod handler;
mod pipeline;

pub use handler::ShareHandler;
pub use pipeline::SharePipeline;
