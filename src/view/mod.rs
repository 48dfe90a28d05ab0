//! Tree-view presentation layer

pub mod tree;

pub use tree::{CollapsibleState, SymbolTreeAdapter, TreeItem};
