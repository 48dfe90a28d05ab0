//! Symbol forest normalization
//!
//! Providers return symbols in declaration-discovery order, which is not
//! always document order. The tree renders in document order, so every
//! fetched forest is normalized before it enters the cache.

use crate::models::Symbol;

/// Sort siblings at every level by (start line, start character), stable
/// for equal keys.
///
/// Pure: the input is never mutated, so a forest handed out of the cache
/// can never be reordered behind the cache's back by a caller that still
/// holds a provider-returned reference.
pub fn sort_by_location(symbols: &[Symbol]) -> Vec<Symbol> {
    let mut sorted: Vec<Symbol> = symbols
        .iter()
        .map(|symbol| {
            let mut symbol = symbol.clone();
            if symbol.has_children() {
                symbol.children = sort_by_location(&symbol.children);
            }
            symbol
        })
        .collect();

    sorted.sort_by_key(|s| (s.range.start.line, s.range.start.character));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Position, Range, SymbolKind};

    fn sym(name: &str, line: u32, character: u32) -> Symbol {
        Symbol::new(
            name,
            SymbolKind::Function,
            Range::new(Position::new(line, character), Position::new(line + 5, 0)),
        )
    }

    #[test]
    fn test_sorts_roots_by_line_then_character() {
        let forest = vec![sym("c", 10, 0), sym("b", 3, 8), sym("a", 3, 2)];
        let sorted = sort_by_location(&forest);
        let names: Vec<_> = sorted.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    fn test_sorts_children_recursively() {
        let parent = sym("parent", 0, 0).with_children(vec![sym("late", 8, 0), sym("early", 2, 0)]);
        let sorted = sort_by_location(&[parent]);
        let names: Vec<_> = sorted[0].children.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["early", "late"]);
    }

    #[test]
    fn test_idempotent() {
        let forest = vec![
            sym("b", 4, 0).with_children(vec![sym("z", 9, 0), sym("y", 5, 0)]),
            sym("a", 1, 0),
        ];
        let once = sort_by_location(&forest);
        let twice = sort_by_location(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_preserves_membership() {
        fn collect_ids(symbols: &[Symbol], out: &mut Vec<String>) {
            for s in symbols {
                out.push(s.identity());
                collect_ids(&s.children, out);
            }
        }

        let forest = vec![
            sym("b", 4, 0).with_children(vec![sym("z", 9, 0), sym("y", 5, 0)]),
            sym("a", 1, 0),
        ];
        let sorted = sort_by_location(&forest);

        let mut before = Vec::new();
        let mut after = Vec::new();
        collect_ids(&forest, &mut before);
        collect_ids(&sorted, &mut after);
        before.sort();
        after.sort();
        assert_eq!(before, after);
    }

    #[test]
    fn test_does_not_mutate_input() {
        let forest = vec![sym("b", 4, 0), sym("a", 1, 0)];
        let _ = sort_by_location(&forest);
        assert_eq!(forest[0].name, "b");
    }

    #[test]
    fn test_stable_for_equal_keys() {
        let forest = vec![sym("first", 2, 0), sym("second", 2, 0)];
        let sorted = sort_by_location(&forest);
        let names: Vec<_> = sorted.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["first", "second"]);
    }
}
