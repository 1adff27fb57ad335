//! Table writer - output table → single-sheet .xlsx

use crate::core::number::round_cents;
use crate::error::{ExtractError, ExtractResult};
use crate::types::{CellValue, Extraction, OutputTable, WrittenTable, TABLE_COLUMNS, VALUE_COLUMN};
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook, Worksheet, XlsxError};
use std::path::{Path, PathBuf};
use tracing::info;

/// Name of the only worksheet in every output file
pub const SHEET_NAME: &str = "resultado";

/// Display format of the `valor` column: grouped thousands, two decimals
pub const VALUE_NUMBER_FORMAT: &str = "#,##0.00";

/// Display formats of date cells carried over from the source
pub const DATE_NUMBER_FORMAT: &str = "yyyy-mm-dd";
pub const DATETIME_NUMBER_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

/// Fixed display width of the `valor` column
pub const VALUE_COLUMN_WIDTH: f64 = 14.0;

pub const MIN_COLUMN_WIDTH: usize = 10;
pub const MAX_COLUMN_WIDTH: usize = 60;

/// Writes one [`OutputTable`] as a formatted .xlsx file
pub struct TableExporter<'a> {
    table: &'a OutputTable,
}

impl<'a> TableExporter<'a> {
    pub fn new(table: &'a OutputTable) -> Self {
        Self { table }
    }

    /// Write the table and return the absolute path written
    pub fn export(&self, output_path: &Path) -> ExtractResult<PathBuf> {
        let absolute = std::path::absolute(output_path).map_err(|e| ExtractError::OutputWrite {
            path: output_path.to_path_buf(),
            detail: e.to_string(),
        })?;
        let write_error = |e: XlsxError| ExtractError::OutputWrite {
            path: absolute.clone(),
            detail: e.to_string(),
        };

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(SHEET_NAME).map_err(write_error)?;

        self.write_rows(worksheet).map_err(write_error)?;

        for (col, width) in column_widths(self.table).into_iter().enumerate() {
            worksheet
                .set_column_width(col as u16, width)
                .map_err(write_error)?;
        }

        workbook.save(&absolute).map_err(write_error)?;
        info!(path = %absolute.display(), records = self.table.len(), "table written");

        Ok(absolute)
    }

    fn write_rows(&self, worksheet: &mut Worksheet) -> Result<(), XlsxError> {
        let value_format = Format::new().set_num_format(VALUE_NUMBER_FORMAT);
        let date_format = Format::new().set_num_format(DATE_NUMBER_FORMAT);
        let datetime_format = Format::new().set_num_format(DATETIME_NUMBER_FORMAT);

        for (col, name) in TABLE_COLUMNS.iter().enumerate() {
            worksheet.write_string(0, col as u16, *name)?;
        }

        for (idx, record) in self.table.records.iter().enumerate() {
            let row = idx as u32 + 1;
            for (col, cell) in record.cells().iter().enumerate() {
                let col = col as u16;
                if col as usize == VALUE_COLUMN {
                    if let Some(value) = coerce_amount(cell.as_ref()) {
                        worksheet.write_number_with_format(row, col, value, &value_format)?;
                    }
                    continue;
                }
                match cell {
                    Some(CellValue::Text(s)) => {
                        worksheet.write_string(row, col, s)?;
                    }
                    Some(CellValue::Number(n)) if n.is_finite() => {
                        worksheet.write_number(row, col, *n)?;
                    }
                    Some(CellValue::Number(n)) => {
                        worksheet.write_string(row, col, n.to_string())?;
                    }
                    Some(CellValue::Bool(b)) => {
                        worksheet.write_boolean(row, col, *b)?;
                    }
                    Some(CellValue::DateTime(iso)) => match ExcelDateTime::parse_from_str(iso) {
                        Ok(datetime) => {
                            let format = if iso.contains(['T', ' ']) {
                                &datetime_format
                            } else {
                                &date_format
                            };
                            worksheet.write_datetime_with_format(row, col, &datetime, format)?;
                        }
                        Err(_) => {
                            worksheet.write_string(row, col, iso)?;
                        }
                    },
                    None => {}
                }
            }
        }

        Ok(())
    }
}

/// Write every partition table of an extraction into `dir`, in layout order
pub fn write_partitions(extraction: &Extraction, dir: &Path) -> ExtractResult<Vec<WrittenTable>> {
    extraction
        .tables
        .iter()
        .map(|partition| {
            let path = TableExporter::new(&partition.table).export(&dir.join(&partition.file_name))?;
            Ok(WrittenTable {
                partition: partition.partition.clone(),
                path,
                records: partition.table.len(),
            })
        })
        .collect()
}

/// Last-line numeric coercion of `valor`: absolute, finite, cents.
///
/// A no-op for records built by the row evaluator.
fn coerce_amount(cell: Option<&CellValue>) -> Option<f64> {
    match cell? {
        CellValue::Number(n) if n.is_finite() => Some(round_cents(n.abs())),
        _ => None,
    }
}

/// Display widths of every column, in [`TABLE_COLUMNS`] order.
///
/// `valor` is fixed; the rest fit their longest rendered value (header
/// included) plus 2, clamped to `MIN_COLUMN_WIDTH..=MAX_COLUMN_WIDTH`.
pub fn column_widths(table: &OutputTable) -> Vec<f64> {
    let mut longest: Vec<usize> = TABLE_COLUMNS.iter().map(|h| h.chars().count()).collect();

    for record in &table.records {
        for (col, cell) in record.cells().iter().enumerate() {
            if let Some(value) = cell {
                longest[col] = longest[col].max(value.to_string().chars().count());
            }
        }
    }

    longest
        .into_iter()
        .enumerate()
        .map(|(col, len)| {
            if col == VALUE_COLUMN {
                VALUE_COLUMN_WIDTH
            } else {
                (len + 2).clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH) as f64
            }
        })
        .collect()
}
