//! Infrastructure layer for codetree
//!
//! Timing primitives shared by the coordinator: debounced scheduling and
//! bounded retry.

pub mod debounce;
pub mod retry;

pub use debounce::Debouncer;
pub use retry::{RetryConfig, with_retry};
