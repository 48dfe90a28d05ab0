//! Cursor-to-symbol mapping

use crate::models::{Position, Symbol};

/// Find the innermost symbol whose range contains the position.
///
/// Depth-first: the first containing sibling wins (siblings are assumed
/// non-overlapping; a misbehaving provider that reports overlaps gets
/// first-match behavior rather than an error), and its children are
/// searched before the node itself is accepted.
pub fn find_enclosing(symbols: &[Symbol], position: Position) -> Option<&Symbol> {
    for symbol in symbols {
        if symbol.range.contains(position) {
            if symbol.has_children()
                && let Some(child) = find_enclosing(&symbol.children, position)
            {
                return Some(child);
            }
            return Some(symbol);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Range, SymbolKind};

    fn sym(name: &str, kind: SymbolKind, start_line: u32, end_line: u32) -> Symbol {
        Symbol::new(
            name,
            kind,
            Range::new(Position::new(start_line, 0), Position::new(end_line, 0)),
        )
    }

    fn forest() -> Vec<Symbol> {
        vec![
            sym("Outer", SymbolKind::Class, 0, 30).with_children(vec![
                sym("first", SymbolKind::Method, 2, 8),
                sym("second", SymbolKind::Method, 10, 20).with_children(vec![sym(
                    "closure",
                    SymbolKind::Function,
                    12,
                    15,
                )]),
            ]),
            sym("tail", SymbolKind::Function, 40, 50),
        ]
    }

    #[test]
    fn test_returns_deepest_descendant() {
        let forest = forest();
        let found = find_enclosing(&forest, Position::new(13, 4)).unwrap();
        assert_eq!(found.name, "closure");
    }

    #[test]
    fn test_returns_node_when_no_child_matches() {
        let forest = forest();
        let found = find_enclosing(&forest, Position::new(9, 0)).unwrap();
        assert_eq!(found.name, "Outer");
    }

    #[test]
    fn test_returns_sibling_by_position() {
        let forest = forest();
        let found = find_enclosing(&forest, Position::new(4, 2)).unwrap();
        assert_eq!(found.name, "first");

        let found = find_enclosing(&forest, Position::new(45, 0)).unwrap();
        assert_eq!(found.name, "tail");
    }

    #[test]
    fn test_none_outside_all_ranges() {
        let forest = forest();
        assert!(find_enclosing(&forest, Position::new(35, 0)).is_none());
        assert!(find_enclosing(&forest, Position::new(99, 0)).is_none());
    }

    #[test]
    fn test_empty_forest() {
        assert!(find_enclosing(&[], Position::new(0, 0)).is_none());
    }

    #[test]
    fn test_overlapping_siblings_first_match_wins() {
        let forest = vec![
            sym("a", SymbolKind::Function, 0, 10),
            sym("b", SymbolKind::Function, 5, 15),
        ];
        let found = find_enclosing(&forest, Position::new(7, 0)).unwrap();
        assert_eq!(found.name, "a");
    }
}
