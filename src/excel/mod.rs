//! Spreadsheet I/O
//!
//! - Import: OpenDocument (.ods) workbook → source grids → partitioned tables
//! - Export: output table → formatted single-sheet .xlsx

pub mod address;
mod exporter;
pub mod grid;
mod importer;

pub use address::{column_index, column_letters, CellRef};
pub use exporter::{
    column_widths, write_partitions, TableExporter, DATETIME_NUMBER_FORMAT, DATE_NUMBER_FORMAT,
    MAX_COLUMN_WIDTH, MIN_COLUMN_WIDTH, SHEET_NAME, VALUE_COLUMN_WIDTH, VALUE_NUMBER_FORMAT,
};
pub use grid::SourceGrid;
pub use importer::WorkbookImporter;
