//! Row inclusion rule: one record per non-zero amount of an identified row

use crate::core::number::to_positive_amount;
use crate::excel::address::CellRef;
use crate::excel::grid::SourceGrid;
use crate::layout::ResolvedLayout;
use crate::types::{is_filled, OutputRecord, SharedMetadata};
use tracing::debug;

/// Evaluates data rows of one sheet against a layout.
///
/// The shared metadata cells are read once, on construction.
pub struct RowEvaluator<'a> {
    grid: &'a SourceGrid,
    layout: &'a ResolvedLayout,
    metadata: SharedMetadata,
}

impl<'a> RowEvaluator<'a> {
    pub fn new(grid: &'a SourceGrid, layout: &'a ResolvedLayout) -> Self {
        let read = |at: CellRef| grid.get(at).cloned();
        let metadata = SharedMetadata {
            month_year: read(layout.metadata.month_year),
            sequence: read(layout.metadata.sequence),
            justification: read(layout.metadata.justification),
            legal_document: read(layout.metadata.legal_document),
        };
        Self {
            grid,
            layout,
            metadata,
        }
    }

    pub fn metadata(&self) -> &SharedMetadata {
        &self.metadata
    }

    /// Records for a 1-based data row, in value-column order.
    ///
    /// Empty unless the row has at least one amount AND one non-blank
    /// identity cell.
    pub fn evaluate(&self, row_number: usize) -> Vec<OutputRecord> {
        let Some(row) = row_number.checked_sub(1) else {
            return Vec::new();
        };
        let at = |col: usize| self.grid.get(CellRef::new(row, col));

        let amounts: Vec<f64> = self
            .layout
            .value_columns
            .iter()
            .filter_map(|&col| to_positive_amount(at(col)))
            .collect();
        if amounts.is_empty() {
            return Vec::new();
        }

        let [first, second] = self.layout.identity_columns;
        let identity = [at(first), at(second)];
        if !identity.iter().any(|cell| is_filled(*cell)) {
            debug!(row = row_number, "amount without identity, skipping row");
            return Vec::new();
        }

        amounts
            .into_iter()
            .map(|value| OutputRecord {
                identity: [identity[0].cloned(), identity[1].cloned()],
                metadata: self.metadata.clone(),
                rubric: self.layout.rubric.clone(),
                income_type: self.layout.income_type.clone(),
                value,
            })
            .collect()
    }
}
