//! Reusable utilities shared by the staking services, currently just the
//! tracing/logging bootstrap.

pub mod logging;

// Re-export tracing crate for convenience.
pub use tracing;
