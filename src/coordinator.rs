//! Outline coordinator
//!
//! Wires editor lifecycle events (visibility, editor switch, selection,
//! edit, save) to cache invalidation, refresh and selection-reveal, with
//! debounced handling of edit bursts. Holds all mutable engine state:
//! the symbol cache, the cursor-tracking flag and the pending debounce
//! task. Constructed at activation, dropped at deactivation.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::config::{OutlineConfig, keys};
use crate::error::{HostError, OutlineResult};
use crate::host::{
    EditorControl, FoldingProvider, InputPrompt, Notifier, PreferenceStore, RevealOptions,
    SymbolProvider, TreeViewHost,
};
use crate::infra::{Debouncer, with_retry};
use crate::models::{DocumentId, Location, Symbol};
use crate::services::fold::{FoldController, parse_level};
use crate::services::{SymbolCache, find_enclosing, sort_by_location};
use crate::view::SymbolTreeAdapter;

/// Boundary collaborators supplied by the host editor.
pub struct HostBindings {
    pub symbols: Arc<dyn SymbolProvider>,
    pub folding: Arc<dyn FoldingProvider>,
    pub editor: Arc<dyn EditorControl>,
    pub view: Arc<dyn TreeViewHost>,
    pub preferences: Arc<dyn PreferenceStore>,
    pub notifier: Arc<dyn Notifier>,
    pub prompt: Arc<dyn InputPrompt>,
}

pub struct OutlineCoordinator {
    adapter: Arc<SymbolTreeAdapter>,
    cache: SymbolCache,
    fold: FoldController,
    symbols: Arc<dyn SymbolProvider>,
    editor: Arc<dyn EditorControl>,
    view: Arc<dyn TreeViewHost>,
    preferences: Arc<dyn PreferenceStore>,
    notifier: Arc<dyn Notifier>,
    prompt: Arc<dyn InputPrompt>,
    config: OutlineConfig,
    cursor_tracking: AtomicBool,
    debouncer: Debouncer,
}

impl OutlineCoordinator {
    pub fn new(hosts: HostBindings, config: OutlineConfig) -> Arc<Self> {
        let cursor_tracking = hosts
            .preferences
            .get_bool(keys::CURSOR_TRACKING_ENABLED, false);

        // Publish the display toggles and the restored tracking state.
        hosts.editor.set_context_flag(keys::SHOW_VARIABLES, true);
        hosts.editor.set_context_flag(keys::SHOW_FUNCTION, true);
        hosts
            .editor
            .set_context_flag(keys::CURSOR_TRACKING_ENABLED, cursor_tracking);

        tracing::debug!(
            "Outline coordinator initialized (cursor tracking: {})",
            cursor_tracking
        );

        Arc::new(Self {
            adapter: Arc::new(SymbolTreeAdapter::new()),
            cache: SymbolCache::new(),
            fold: FoldController::new(hosts.folding, Arc::clone(&hosts.editor)),
            symbols: hosts.symbols,
            editor: hosts.editor,
            view: hosts.view,
            preferences: hosts.preferences,
            notifier: hosts.notifier,
            prompt: hosts.prompt,
            debouncer: Debouncer::new(config.debounce()),
            config,
            cursor_tracking: AtomicBool::new(cursor_tracking),
        })
    }

    /// The tree data source to register with the host widget.
    pub fn adapter(&self) -> &Arc<SymbolTreeAdapter> {
        &self.adapter
    }

    pub fn is_cursor_tracking_enabled(&self) -> bool {
        self.cursor_tracking.load(Ordering::SeqCst)
    }

    // ========================================================================
    // Event handlers
    // ========================================================================

    /// Tree view became visible or hidden.
    pub async fn handle_visibility_changed(&self, visible: bool) {
        if visible && self.editor.active_document().is_some() {
            self.refresh_with_retry().await;
        }
    }

    /// The active editor switched. Refreshes only while the view is
    /// visible, to avoid pulling the view open on every editor switch.
    pub async fn handle_active_editor_changed(&self) {
        if self.editor.active_document().is_some() && self.view.is_visible() {
            self.refresh(true).await;
        }
    }

    /// The cursor moved in the active editor.
    pub async fn handle_selection_changed(&self) {
        self.sync_selection().await;
    }

    /// The document content changed. Edits are debounced: only the last
    /// edit in a burst invalidates the cache and triggers a refresh.
    pub async fn handle_document_changed(self: Arc<Self>, document: DocumentId) {
        let Some(active) = self.editor.active_document() else {
            return;
        };
        if active != document || !self.view.is_visible() {
            return;
        }

        let this = Arc::clone(&self);
        self.debouncer
            .schedule(async move {
                this.cache.invalidate(&document).await;
                this.refresh(false).await;
            })
            .await;
    }

    /// The document was saved. Invalidates immediately, bypassing the
    /// debounce window.
    pub async fn handle_document_saved(&self, document: DocumentId) {
        let Some(active) = self.editor.active_document() else {
            return;
        };
        if active != document || !self.view.is_visible() {
            return;
        }

        self.cache.invalidate(&document).await;
        self.refresh(false).await;
    }

    // ========================================================================
    // Actions
    // ========================================================================

    /// User-triggered refresh: drop every cache entry and reload.
    pub async fn refresh_view(&self) {
        self.cache.clear().await;
        self.refresh_with_retry().await;
    }

    /// Jump to a symbol's source location.
    pub async fn go_to_location(&self, location: &Location) -> Result<(), HostError> {
        self.editor.show_location(location).await
    }

    pub async fn fold_all(&self) -> Result<(), HostError> {
        self.fold.fold_all().await
    }

    pub async fn unfold_all(&self) -> Result<(), HostError> {
        self.fold.unfold_all().await
    }

    /// Prompt for a level and unfold the document to it. Invalid input is
    /// rejected inline by the prompt validator; a dismissed prompt is a
    /// no-op.
    pub async fn unfold_to_level(&self) -> OutlineResult<()> {
        let input = self
            .prompt
            .request_input(
                "Unfold to level",
                "0-9",
                &|value| match parse_level(value) {
                    Ok(_) => None,
                    Err(e) => Some(e.to_string()),
                },
            )
            .await;

        let Some(input) = input else {
            return Ok(());
        };
        let level = parse_level(&input)?;

        let Some(document) = self.editor.active_document() else {
            return Ok(());
        };
        self.fold.unfold_to_level(&document, level).await?;
        Ok(())
    }

    /// Fold the foldable regions inside a symbol.
    pub async fn fold_region(&self, symbol: &Symbol) -> Result<(), HostError> {
        let Some(document) = self.editor.active_document() else {
            return Ok(());
        };
        self.fold.fold_region(&document, symbol).await
    }

    /// Collapse every node in the tree widget.
    pub async fn collapse_tree(&self) -> Result<(), HostError> {
        self.view.collapse_all().await
    }

    /// Reveal-with-expand every node in the tree widget.
    pub async fn expand_tree(&self) -> Result<(), HostError> {
        self.adapter.expand_all(self.view.as_ref()).await
    }

    /// Flip cursor tracking, persist the preference, and when enabling,
    /// immediately reveal the symbol under the cursor.
    pub async fn toggle_cursor_tracking(&self) {
        let enabled = !self.cursor_tracking.fetch_xor(true, Ordering::SeqCst);

        self.editor
            .set_context_flag(keys::CURSOR_TRACKING_ENABLED, enabled);
        self.preferences
            .set_bool(keys::CURSOR_TRACKING_ENABLED, enabled);
        self.notifier.info(if enabled {
            "Code tree: cursor tracking enabled"
        } else {
            "Code tree: cursor tracking disabled"
        });

        if enabled {
            self.sync_selection().await;
        }
    }

    // ========================================================================
    // Refresh paths
    // ========================================================================

    /// Refresh the tree for the active document. The cache fast path skips
    /// the provider; the slow path fetches, normalizes and stores.
    pub async fn refresh(&self, use_cache: bool) {
        let Some(document) = self.editor.active_document() else {
            return;
        };

        if use_cache && let Some(forest) = self.cache.get(&document).await {
            self.adapter.refresh(Some(forest));
            self.sync_selection().await;
            return;
        }

        match self.symbols.document_symbols(&document).await {
            Ok(symbols) => {
                self.store_and_render(document, symbols).await;
            }
            Err(e) => {
                // Missing symbols never surface as an error; the view just
                // keeps its previous content.
                tracing::debug!("Symbol fetch failed for {}: {}", document, e);
            }
        }
    }

    /// Slow-path refresh tolerating a provider that is still warming up:
    /// bounded retry with a fixed delay, rendering an empty tree once the
    /// budget is exhausted. Empty documents skip the provider round-trip.
    pub async fn refresh_with_retry(&self) {
        let Some(document) = self.editor.active_document() else {
            return;
        };

        let has_content = self
            .editor
            .document_text(&document)
            .is_some_and(|text| !text.trim().is_empty());
        if !has_content {
            self.refresh(true).await;
            return;
        }

        let retry = self.config.retry();
        let provider = Arc::clone(&self.symbols);
        let result = with_retry(&retry, || {
            let provider = Arc::clone(&provider);
            let document = document.clone();
            async move { provider.document_symbols(&document).await }
        })
        .await;

        match result {
            Ok(symbols) => {
                self.store_and_render(document, symbols).await;
            }
            Err(e) => {
                tracing::debug!("Symbol provider unavailable for {}: {}", document, e);
                self.adapter.refresh(Some(Arc::new(Vec::new())));
            }
        }
    }

    async fn store_and_render(&self, document: DocumentId, symbols: Vec<Symbol>) {
        let forest = Arc::new(sort_by_location(&symbols));
        self.cache
            .insert(document.clone(), Arc::clone(&forest))
            .await;
        tracing::debug!("Rendered {} root symbols for {}", forest.len(), document);
        self.adapter.refresh(Some(forest));
        self.sync_selection().await;
    }

    /// Reveal the innermost symbol enclosing the cursor, selecting without
    /// stealing focus. No-ops unless tracking is enabled, the document is
    /// cached and the view is visible.
    async fn sync_selection(&self) {
        if !self.is_cursor_tracking_enabled() {
            return;
        }
        let Some(document) = self.editor.active_document() else {
            return;
        };
        let Some(forest) = self.cache.get(&document).await else {
            return;
        };
        let Some(position) = self.editor.cursor_position() else {
            return;
        };

        if let Some(symbol) = find_enclosing(&forest, position)
            && self.view.is_visible()
            && let Err(e) = self
                .view
                .reveal(symbol, RevealOptions::select_no_focus())
                .await
        {
            tracing::debug!("Reveal failed for '{}': {}", symbol.name, e);
        }
    }
}
