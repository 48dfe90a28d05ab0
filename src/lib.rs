//! codetree - Symbol-Outline Navigation Engine
//!
//! Renders a hierarchical view of document symbols, keeps it synchronized
//! with the active editor's content and cursor, and offers fold/unfold and
//! jump-to-location actions. Symbol extraction and folding computation are
//! delegated to the host editor through the boundary traits in [`host`];
//! this crate is the coordination layer in between.

pub mod config;
pub mod coordinator;
pub mod error;
pub mod host;
pub mod infra;
pub mod models;
pub mod services;
pub mod view;

pub use config::OutlineConfig;
pub use coordinator::{HostBindings, OutlineCoordinator};
pub use error::{OutlineError, OutlineResult};
