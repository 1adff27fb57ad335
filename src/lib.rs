//! Merit Progression - payroll records from fixed-layout spreadsheets
//!
//! Reads OpenDocument (.ods) workbooks whose sheets follow a fixed cell grid
//! (identity in columns A/B, shared fields in C5/C6/C9/C10, amounts in value
//! columns of fixed row spans) and assembles bulk-import tables, one per
//! output partition, written as .xlsx.
//!
//! # Features
//!
//! - Layout as data: built-in dual/single variants or a YAML layout file
//! - pt-BR currency parsing ("R$ 1.234,56")
//! - Row inclusion rule: non-zero amount AND a filled identity cell
//! - Partition routing by row span, one output file per partition
//!
//! # Example
//!
//! ```no_run
//! use merit_progression::excel::{write_partitions, WorkbookImporter};
//! use merit_progression::layout::Layout;
//! use std::path::Path;
//!
//! let layout = Layout::dual().resolve()?;
//! let extraction = WorkbookImporter::new("folha.ods", layout).import()?;
//!
//! for sheet in &extraction.sheets {
//!     println!("{}: {} records", sheet.sheet, sheet.records);
//! }
//! for output in write_partitions(&extraction, Path::new("."))? {
//!     println!("wrote {}", output.path.display());
//! }
//! # Ok::<(), merit_progression::error::ExtractError>(())
//! ```

pub mod cli;
pub mod core;
pub mod error;
pub mod excel;
pub mod layout;
pub mod types;

// Re-export commonly used types
pub use error::{ExtractError, ExtractResult};
pub use layout::{Layout, ResolvedLayout};
pub use types::{CellValue, Extraction, OutputRecord, OutputTable, SheetCount};
