//! Per-document symbol cache
//!
//! Maps document identity to its last-fetched, normalized symbol forest.
//! Entries are replaced wholesale on re-fetch and dropped on edit/save.
//! No TTL and no eviction: the working set is the handful of documents a
//! user touches in a session.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;

use crate::models::{DocumentId, Symbol};

pub struct SymbolCache {
    entries: RwLock<HashMap<DocumentId, Arc<Vec<Symbol>>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl Default for SymbolCache {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolCache {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Fetch the cached forest for a document, if any.
    pub async fn get(&self, document: &DocumentId) -> Option<Arc<Vec<Symbol>>> {
        let entries = self.entries.read().await;
        match entries.get(document) {
            Some(forest) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                tracing::trace!("Symbol cache hit: {}", document);
                Some(Arc::clone(forest))
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                tracing::trace!("Symbol cache miss: {}", document);
                None
            }
        }
    }

    /// Store a freshly fetched forest, replacing any previous entry.
    pub async fn insert(&self, document: DocumentId, forest: Arc<Vec<Symbol>>) {
        let mut entries = self.entries.write().await;
        entries.insert(document, forest);
    }

    /// Drop the entry for a document after an edit or save.
    pub async fn invalidate(&self, document: &DocumentId) {
        let mut entries = self.entries.write().await;
        if entries.remove(document).is_some() {
            tracing::trace!("Invalidated cache entry: {}", document);
        }
    }

    /// Clear all cached entries.
    pub async fn clear(&self) {
        let mut entries = self.entries.write().await;
        entries.clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    pub async fn stats(&self) -> CacheStats {
        let entries = self.entries.read().await;
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        CacheStats {
            entry_count: entries.len(),
            hits,
            misses,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CacheStats {
    pub entry_count: usize,
    pub hits: u64,
    pub misses: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Position, Range, SymbolKind};

    fn forest(name: &str) -> Arc<Vec<Symbol>> {
        Arc::new(vec![Symbol::new(
            name,
            SymbolKind::Function,
            Range::new(Position::new(0, 0), Position::new(3, 0)),
        )])
    }

    #[tokio::test]
    async fn test_miss_then_hit() {
        let cache = SymbolCache::new();
        let doc = DocumentId::from("file:///main.rs");

        assert!(cache.get(&doc).await.is_none());

        cache.insert(doc.clone(), forest("main")).await;
        let cached = cache.get(&doc).await.unwrap();
        assert_eq!(cached[0].name, "main");

        let stats = cache.stats().await;
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entry_count, 1);
    }

    #[tokio::test]
    async fn test_insert_replaces_wholesale() {
        let cache = SymbolCache::new();
        let doc = DocumentId::from("file:///main.rs");

        cache.insert(doc.clone(), forest("before")).await;
        cache.insert(doc.clone(), forest("after")).await;

        let cached = cache.get(&doc).await.unwrap();
        assert_eq!(cached.len(), 1);
        assert_eq!(cached[0].name, "after");
    }

    #[tokio::test]
    async fn test_invalidate_drops_only_that_document() {
        let cache = SymbolCache::new();
        let main = DocumentId::from("file:///main.rs");
        let lib = DocumentId::from("file:///lib.rs");

        cache.insert(main.clone(), forest("main")).await;
        cache.insert(lib.clone(), forest("lib")).await;
        cache.invalidate(&main).await;

        assert!(cache.get(&main).await.is_none());
        assert!(cache.get(&lib).await.is_some());
    }

    #[tokio::test]
    async fn test_clear_resets_stats() {
        let cache = SymbolCache::new();
        let doc = DocumentId::from("file:///main.rs");

        cache.insert(doc.clone(), forest("main")).await;
        let _ = cache.get(&doc).await;
        cache.clear().await;

        let stats = cache.stats().await;
        assert_eq!(stats.entry_count, 0);
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
    }
}
