//! Symbol tree data source
//!
//! Presents the current symbol forest to the host's tree widget: children,
//! parent lookup, display items, change notifications and whole-tree
//! expansion. Parent links are reconstructed by identity search over the
//! forest rather than stored back-pointers; reveal operations are rare and
//! forests are single-document sized, so the O(forest) search is fine.

use std::sync::{Arc, RwLock, RwLockReadGuard};

use tokio::sync::broadcast;

use crate::error::HostError;
use crate::host::{RevealOptions, TreeViewHost};
use crate::models::{Location, Symbol};

/// Collapse state of a rendered tree item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollapsibleState {
    /// Leaf, no disclosure arrow.
    None,
    Collapsed,
    Expanded,
}

/// Display descriptor handed to the host widget.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeItem {
    /// Stable identity across refreshes.
    pub id: String,
    pub label: String,
    /// Host theme-icon identifier.
    pub icon: &'static str,
    pub tooltip: String,
    pub collapsible_state: CollapsibleState,
    /// Jump target, bound when the symbol carries a resolvable location.
    pub go_to: Option<Location>,
    /// Context tag for host menu contributions.
    pub context_value: &'static str,
}

const CONTEXT_VALUE: &str = "codeTreeItem";

pub struct SymbolTreeAdapter {
    forest: RwLock<Arc<Vec<Symbol>>>,
    changed: broadcast::Sender<()>,
}

impl Default for SymbolTreeAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTreeAdapter {
    pub fn new() -> Self {
        let (changed, _) = broadcast::channel(16);
        Self {
            forest: RwLock::new(Arc::new(Vec::new())),
            changed,
        }
    }

    fn read_forest(&self) -> RwLockReadGuard<'_, Arc<Vec<Symbol>>> {
        match self.forest.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Current forest snapshot.
    pub fn snapshot(&self) -> Arc<Vec<Symbol>> {
        Arc::clone(&self.read_forest())
    }

    /// Children of a node, or the root sequence when no node is given.
    pub fn children(&self, node: Option<&Symbol>) -> Vec<Symbol> {
        match node {
            Some(node) => node.children.clone(),
            None => self.read_forest().as_ref().clone(),
        }
    }

    /// Parent of a node, found by full recursive identity search.
    pub fn parent_of(&self, node: &Symbol) -> Option<Symbol> {
        let forest = self.snapshot();
        find_parent(&forest, &node.identity()).cloned()
    }

    /// Nesting depth of a node; roots are depth 1.
    pub fn depth_of(&self, node: &Symbol) -> u32 {
        let mut depth = 1;
        let mut current = self.parent_of(node);
        while let Some(parent) = current {
            depth += 1;
            current = self.parent_of(&parent);
        }
        depth
    }

    /// Display descriptor for a node.
    ///
    /// Container kinds (namespace, module, class) start expanded at the top
    /// level of the tree; everything else with children starts collapsed.
    pub fn tree_item(&self, node: &Symbol) -> TreeItem {
        let collapsible_state = if !node.has_children() {
            CollapsibleState::None
        } else if self.depth_of(node) <= 1 && node.kind.is_container() {
            CollapsibleState::Expanded
        } else {
            CollapsibleState::Collapsed
        };

        TreeItem {
            id: node.identity(),
            label: node.name.clone(),
            icon: node.kind.icon(),
            tooltip: node.detail.clone().unwrap_or_else(|| node.name.clone()),
            collapsible_state,
            go_to: node.location.clone(),
            context_value: CONTEXT_VALUE,
        }
    }

    /// Replace the forest (if given) and notify the host to re-render.
    /// The notification fires even for an identical forest.
    pub fn refresh(&self, forest: Option<Arc<Vec<Symbol>>>) {
        if let Some(forest) = forest {
            let mut held = match self.forest.write() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            *held = forest;
        }
        tracing::debug!("Tree refresh notification");
        // No receivers is fine; the host may not have subscribed yet.
        let _ = self.changed.send(());
    }

    /// Subscribe to change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.changed.subscribe()
    }

    /// Reveal-with-expand every node, root first, sequentially.
    pub async fn expand_all(&self, view: &dyn TreeViewHost) -> Result<(), HostError> {
        let forest = self.snapshot();
        for node in preorder(&forest) {
            view.reveal(node, RevealOptions::expand_only()).await?;
        }
        Ok(())
    }
}

fn find_parent<'a>(symbols: &'a [Symbol], target_id: &str) -> Option<&'a Symbol> {
    for symbol in symbols {
        if symbol.children.iter().any(|c| c.identity() == target_id) {
            return Some(symbol);
        }
        if let Some(found) = find_parent(&symbol.children, target_id) {
            return Some(found);
        }
    }
    None
}

fn preorder(symbols: &[Symbol]) -> Vec<&Symbol> {
    let mut out = Vec::new();
    for symbol in symbols {
        out.push(symbol);
        out.extend(preorder(&symbol.children));
    }
    out
}
