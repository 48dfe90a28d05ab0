//! Service layer for codetree

pub mod cache;
pub mod fold;
pub mod locator;
pub mod normalize;

pub use cache::{CacheStats, SymbolCache};
pub use fold::{FoldController, MAX_FOLD_LEVEL, parse_level};
pub use locator::find_enclosing;
pub use normalize::sort_by_location;
