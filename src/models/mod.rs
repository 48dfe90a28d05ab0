//! Data models for codetree
//!
//! Contains core type definitions used throughout the crate.

pub mod folding;
pub mod symbol;

// Re-export commonly used types
pub use folding::FoldingRange;
pub use symbol::{DocumentId, Location, Position, Range, Symbol, SymbolKind};
