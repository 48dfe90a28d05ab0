//! Fold control
//!
//! Translates symbols and numeric depths into sets of foldable start lines
//! and issues fold/unfold requests against the editor surface. Nesting is
//! reconstructed from the flat range list by containment counting.

use std::sync::Arc;

use crate::error::{HostError, InputError};
use crate::host::{EditorControl, FoldingProvider};
use crate::models::{DocumentId, FoldingRange, Symbol};

/// Maximum accepted unfold level.
pub const MAX_FOLD_LEVEL: u8 = 9;

/// Parse a user-supplied unfold level. Accepts `"0"..="9"` only.
pub fn parse_level(input: &str) -> Result<u8, InputError> {
    input
        .trim()
        .parse::<u8>()
        .ok()
        .filter(|level| *level <= MAX_FOLD_LEVEL)
        .ok_or(InputError::LevelOutOfRange)
}

/// Nesting level of a range: 1 for top-level, plus one per range strictly
/// containing it.
pub fn nesting_level(range: &FoldingRange, all: &[FoldingRange]) -> u32 {
    1 + all.iter().filter(|other| range.is_inside(other)).count() as u32
}

/// Start lines of every range whose nesting level is at most `level`.
pub fn start_lines_to_level(ranges: &[FoldingRange], level: u8) -> Vec<u32> {
    ranges
        .iter()
        .filter(|range| nesting_level(range, ranges) <= u32::from(level))
        .map(|range| range.start_line)
        .collect()
}

/// Start lines of every range lying within the symbol's defining lines.
pub fn start_lines_within(ranges: &[FoldingRange], symbol: &Symbol) -> Vec<u32> {
    let start = symbol.range.start.line;
    let end = symbol.range.end.line;
    ranges
        .iter()
        .filter(|range| range.start_line >= start && range.end_line <= end)
        .map(|range| range.start_line)
        .collect()
}

pub struct FoldController {
    folding: Arc<dyn FoldingProvider>,
    editor: Arc<dyn EditorControl>,
}

impl FoldController {
    pub fn new(folding: Arc<dyn FoldingProvider>, editor: Arc<dyn EditorControl>) -> Self {
        Self { folding, editor }
    }

    /// Folding ranges for the document; provider failures degrade to an
    /// empty list so every fold action becomes a no-op.
    async fn ranges_for(&self, document: &DocumentId) -> Vec<FoldingRange> {
        match self.folding.folding_ranges(document).await {
            Ok(ranges) => ranges,
            Err(e) => {
                tracing::debug!("No folding ranges for {}: {}", document, e);
                Vec::new()
            }
        }
    }

    /// Fold everything, then unfold every region nested no deeper than
    /// `level`. Level 0 leaves the document fully folded.
    pub async fn unfold_to_level(
        &self,
        document: &DocumentId,
        level: u8,
    ) -> Result<(), HostError> {
        if level == 0 {
            return self.editor.fold_all().await;
        }

        let ranges = self.ranges_for(document).await;
        if ranges.is_empty() {
            return Ok(());
        }

        self.editor.fold_all().await?;
        let lines = start_lines_to_level(&ranges, level);
        tracing::debug!("Unfolding {} regions to level {}", lines.len(), level);
        self.editor.unfold_lines(&lines).await
    }

    /// Fold every foldable region inside the symbol's defining line range.
    pub async fn fold_region(
        &self,
        document: &DocumentId,
        symbol: &Symbol,
    ) -> Result<(), HostError> {
        let ranges = self.ranges_for(document).await;
        if ranges.is_empty() {
            return Ok(());
        }

        let lines = start_lines_within(&ranges, symbol);
        if lines.is_empty() {
            return Ok(());
        }
        tracing::debug!("Folding {} regions under '{}'", lines.len(), symbol.name);
        self.editor.fold_lines(&lines).await
    }

    pub async fn fold_all(&self) -> Result<(), HostError> {
        self.editor.fold_all().await
    }

    pub async fn unfold_all(&self) -> Result<(), HostError> {
        self.editor.unfold_all().await
    }
}
