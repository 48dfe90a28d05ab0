//! Host editor boundary
//!
//! Capability traits the embedding editor supplies: symbol and folding
//! providers, the editor control surface, the tree-view widget handle, and
//! the user-facing prompt/notification channels. The engine never talks to
//! an editor directly; everything goes through these seams.

pub mod prefs;

pub use prefs::{FilePreferenceStore, PreferenceStore};

use async_trait::async_trait;

use crate::error::{HostError, ProviderError};
use crate::models::{DocumentId, FoldingRange, Location, Position, Symbol};

/// Document-symbol capability.
#[async_trait]
pub trait SymbolProvider: Send + Sync {
    /// Fetch the symbol forest for a document. An empty forest is a valid
    /// answer; `ProviderError::NotReady` signals the provider is still
    /// initializing and the request is worth retrying.
    async fn document_symbols(&self, document: &DocumentId)
    -> Result<Vec<Symbol>, ProviderError>;
}

/// Folding-range capability. Ranges come back flat, without nesting
/// metadata.
#[async_trait]
pub trait FoldingProvider: Send + Sync {
    async fn folding_ranges(
        &self,
        document: &DocumentId,
    ) -> Result<Vec<FoldingRange>, ProviderError>;
}

/// Editor control surface: active-editor state plus fold and navigation
/// commands.
#[async_trait]
pub trait EditorControl: Send + Sync {
    fn active_document(&self) -> Option<DocumentId>;

    /// Cursor position in the active editor.
    fn cursor_position(&self) -> Option<Position>;

    /// Full text of a document, used to skip symbol requests for empty
    /// files.
    fn document_text(&self, document: &DocumentId) -> Option<String>;

    async fn fold_lines(&self, lines: &[u32]) -> Result<(), HostError>;

    async fn unfold_lines(&self, lines: &[u32]) -> Result<(), HostError>;

    async fn fold_all(&self) -> Result<(), HostError>;

    async fn unfold_all(&self) -> Result<(), HostError>;

    /// Open the document, scroll the range into view and place the cursor
    /// at its start.
    async fn show_location(&self, location: &Location) -> Result<(), HostError>;

    /// Publish a boolean context flag for menu/when-clause visibility.
    fn set_context_flag(&self, key: &str, value: bool);
}

/// How a tree node should be revealed.
#[derive(Debug, Clone, Copy, Default)]
pub struct RevealOptions {
    pub select: bool,
    pub focus: bool,
    pub expand: bool,
}

impl RevealOptions {
    /// Select and expand to the node without stealing focus.
    pub fn select_no_focus() -> Self {
        Self {
            select: true,
            focus: false,
            expand: true,
        }
    }

    pub fn expand_only() -> Self {
        Self {
            select: false,
            focus: false,
            expand: true,
        }
    }
}

/// Handle to the host's tree-view widget.
#[async_trait]
pub trait TreeViewHost: Send + Sync {
    async fn reveal(&self, node: &Symbol, options: RevealOptions) -> Result<(), HostError>;

    fn is_visible(&self) -> bool;

    async fn collapse_all(&self) -> Result<(), HostError>;
}

/// Informational notifications shown to the user.
pub trait Notifier: Send + Sync {
    fn info(&self, message: &str);
}

/// Single-line user input with inline validation. The validator returns an
/// error message for invalid input, `None` when the value is acceptable.
#[async_trait]
pub trait InputPrompt: Send + Sync {
    /// Returns `None` when the user dismissed the prompt.
    async fn request_input(
        &self,
        prompt: &str,
        placeholder: &str,
        validate: &(dyn for<'a> Fn(&'a str) -> Option<String> + Send + Sync),
    ) -> Option<String>;
}
