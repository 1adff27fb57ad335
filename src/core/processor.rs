//! Per-sheet scan of the configured row ranges with partition routing

use crate::core::evaluator::RowEvaluator;
use crate::excel::grid::SourceGrid;
use crate::layout::ResolvedLayout;
use crate::types::OutputRecord;
use tracing::debug;

/// Records one sheet produced, bucketed by output index
#[derive(Debug, Clone, PartialEq)]
pub struct SheetOutput {
    /// `partitions[i]` belongs to `layout.outputs[i]`
    pub partitions: Vec<Vec<OutputRecord>>,
}

impl SheetOutput {
    /// Total across all partitions
    pub fn record_count(&self) -> usize {
        self.partitions.iter().map(Vec::len).sum()
    }
}

/// Scan every configured range of a sheet.
///
/// Ranges are visited in configured order, rows ascending; overlapping ranges
/// are scanned once each.
pub fn process_sheet(grid: &SourceGrid, layout: &ResolvedLayout) -> SheetOutput {
    let evaluator = RowEvaluator::new(grid, layout);
    let mut partitions = vec![Vec::new(); layout.outputs.len()];

    for range in &layout.ranges {
        let bucket = &mut partitions[range.output];
        for row in range.rows() {
            let records = evaluator.evaluate(row);
            if !records.is_empty() {
                debug!(row, records = records.len(), "row produced records");
            }
            bucket.extend(records);
        }
    }

    SheetOutput { partitions }
}
