//! Extraction core: number parsing, the row inclusion rule and sheet scans

pub mod evaluator;
pub mod number;
pub mod processor;

pub use evaluator::RowEvaluator;
pub use number::{parse_number, parse_text, to_positive_amount};
pub use processor::{process_sheet, SheetOutput};
