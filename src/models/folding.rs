//! Folding range model
//!
//! The folding provider reports flat (start, end) line pairs with no
//! nesting metadata; nesting is reconstructed by containment counting in
//! the fold controller.

use serde::{Deserialize, Serialize};

/// A collapsible region of the document, in whole lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoldingRange {
    pub start_line: u32,
    pub end_line: u32,
}

impl FoldingRange {
    pub fn new(start_line: u32, end_line: u32) -> Self {
        Self {
            start_line,
            end_line,
        }
    }

    /// Strict containment: both endpoints strictly inside `other`.
    pub fn is_inside(&self, other: &FoldingRange) -> bool {
        other.start_line < self.start_line && other.end_line > self.end_line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_containment() {
        let outer = FoldingRange::new(0, 10);
        let inner = FoldingRange::new(2, 4);
        assert!(inner.is_inside(&outer));
        assert!(!outer.is_inside(&inner));
    }

    #[test]
    fn test_shared_endpoint_is_not_containment() {
        let a = FoldingRange::new(0, 10);
        let b = FoldingRange::new(0, 4);
        assert!(!b.is_inside(&a));
        assert!(!a.is_inside(&a));
    }
}
