//! Header-less source grids and out-of-range tolerant cell access

use crate::error::ExtractResult;
use crate::excel::address::CellRef;
use crate::types::CellValue;
use calamine::{Data, Range};
use std::collections::HashMap;
use tracing::debug;

/// Immutable cell grid of one sheet, keyed by absolute 0-based position.
///
/// Empty cells are not stored. Reading outside the populated area yields
/// `None`, never an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceGrid {
    cells: HashMap<CellRef, CellValue>,
    height: usize,
    width: usize,
}

impl SourceGrid {
    /// Build a grid from a calamine range, keeping absolute positions.
    ///
    /// calamine trims leading empty rows/columns and reports them through
    /// `start()`; the offset is added back so `C5` stays at row 4, column 2.
    pub fn from_range(range: &Range<Data>) -> Self {
        let (Some((row0, col0)), Some((row_end, col_end))) = (range.start(), range.end()) else {
            return Self::default();
        };
        let (row0, col0) = (row0 as usize, col0 as usize);
        let (height, width) = range.get_size();
        let flat: Vec<&Data> = range.cells().map(|(_, _, data)| data).collect();

        let cells: HashMap<CellRef, CellValue> = realign_rows(&flat, height, width, col0)
            .into_iter()
            .filter_map(|(row, col, data)| {
                cell_value(data).map(|value| (CellRef::new(row0 + row, col0 + col), value))
            })
            .collect();

        let last_row = cells.keys().map(|c| c.row + 1).max().unwrap_or(0);
        Self {
            cells,
            height: last_row.max(row_end as usize + 1),
            width: col_end as usize + 1,
        }
    }

    /// Build a grid from explicit cells
    pub fn from_cells(cells: impl IntoIterator<Item = (CellRef, CellValue)>) -> Self {
        let cells: HashMap<CellRef, CellValue> = cells.into_iter().collect();
        let height = cells.keys().map(|c| c.row + 1).max().unwrap_or(0);
        let width = cells.keys().map(|c| c.col + 1).max().unwrap_or(0);
        Self {
            cells,
            height,
            width,
        }
    }

    /// (rows, columns) spanned by the grid
    pub fn size(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cell at a resolved position
    pub fn get(&self, at: CellRef) -> Option<&CellValue> {
        if at.row >= self.height || at.col >= self.width {
            return None;
        }
        self.cells.get(&at)
    }

    /// Cell at column letters and a 1-based row number.
    ///
    /// Only malformed letters are an error; row 0 and out-of-range positions
    /// read as `None`.
    pub fn cell(&self, letters: &str, row_number: usize) -> ExtractResult<Option<&CellValue>> {
        Ok(CellRef::resolve(letters, row_number)?.and_then(|at| self.get(at)))
    }
}

/// Relative `(row, col)` of every non-empty cell of a row-major range buffer.
///
/// calamine's .ods reader pads each empty row inside the used area with
/// `col_min` extra cells when that area does not start at column A, so the
/// buffer runs longer than `height * width` and `Range::cells()` drifts. Such
/// buffers are re-walked row by row: a chunk holding any value is a data row
/// of `width` cells, an all-empty chunk is a padded row of `width + col_min`.
fn realign_rows<'a>(
    flat: &[&'a Data],
    height: usize,
    width: usize,
    col_min: usize,
) -> Vec<(usize, usize, &'a Data)> {
    if width == 0 {
        return Vec::new();
    }
    fn is_empty(data: &Data) -> bool {
        *data == Data::Empty
    }

    if flat.len() == height * width {
        return flat
            .iter()
            .enumerate()
            .filter(|(_, data)| !is_empty(data))
            .map(|(i, data)| (i / width, i % width, *data))
            .collect();
    }

    debug!(
        cells = flat.len(),
        height, width, "range buffer longer than its area, realigning rows"
    );
    let mut found = Vec::new();
    let (mut pos, mut row) = (0, 0);
    while pos < flat.len() {
        let chunk = &flat[pos..flat.len().min(pos + width)];
        if chunk.iter().any(|data| !is_empty(data)) {
            found.extend(
                chunk
                    .iter()
                    .enumerate()
                    .filter(|(_, data)| !is_empty(data))
                    .map(|(col, data)| (row, col, *data)),
            );
            pos += width;
        } else {
            pos += width + col_min;
        }
        row += 1;
    }
    found
}

/// Map a calamine cell to a source value; empty and error cells are absent
pub fn cell_value(data: &Data) -> Option<CellValue> {
    match data {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => Some(CellValue::Text(s.clone())),
        Data::Float(f) => Some(CellValue::Number(*f)),
        Data::Int(i) => Some(CellValue::Number(*i as f64)),
        Data::Bool(b) => Some(CellValue::Bool(*b)),
        Data::DateTime(dt) => Some(CellValue::Number(dt.as_f64())),
        Data::DateTimeIso(s) => Some(CellValue::DateTime(s.clone())),
        Data::DurationIso(s) => Some(CellValue::Text(s.clone())),
    }
}
