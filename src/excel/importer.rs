//! Workbook pipeline - OpenDocument (.ods) → partitioned output tables

use crate::core::process_sheet;
use crate::error::{ExtractError, ExtractResult};
use crate::excel::grid::SourceGrid;
use crate::layout::ResolvedLayout;
use crate::types::{Extraction, OutputTable, PartitionTable, SheetCount};
use calamine::{open_workbook, Ods, OdsError, Reader};
use std::io::{Read, Seek};
use std::path::{Path, PathBuf};
use tracing::info;

/// Reads a source workbook and assembles one table per layout partition
pub struct WorkbookImporter {
    path: PathBuf,
    layout: ResolvedLayout,
}

impl WorkbookImporter {
    /// Create a new importer
    pub fn new<P: AsRef<Path>>(path: P, layout: ResolvedLayout) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            layout,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn layout(&self) -> &ResolvedLayout {
        &self.layout
    }

    /// Open the .ods file and extract every sheet
    pub fn import(&self) -> ExtractResult<Extraction> {
        if !self.path.exists() {
            return Err(ExtractError::SourceNotFound(self.path.clone()));
        }

        let mut workbook: Ods<_> =
            open_workbook(&self.path).map_err(|e: OdsError| ExtractError::SourceOpen {
                path: self.path.clone(),
                detail: e.to_string(),
            })?;

        self.extract(&mut workbook)
    }

    /// Extract every sheet of an already opened workbook, in file order.
    ///
    /// Generic over the reader so any format calamine understands can be fed
    /// through the same rules.
    pub fn extract<RS, R>(&self, workbook: &mut R) -> ExtractResult<Extraction>
    where
        RS: Read + Seek,
        R: Reader<RS>,
    {
        let mut tables: Vec<OutputTable> = vec![OutputTable::new(); self.layout.outputs.len()];
        let mut sheets = Vec::new();

        for sheet_name in workbook.sheet_names() {
            let range = workbook
                .worksheet_range(&sheet_name)
                .map_err(|e| ExtractError::SourceOpen {
                    path: self.path.clone(),
                    detail: format!("sheet '{}': {:?}", sheet_name, e),
                })?;
            let grid = SourceGrid::from_range(&range);

            let output = process_sheet(&grid, &self.layout);
            let records = output.record_count();
            info!(sheet = %sheet_name, records, "sheet processed");

            for (table, partition) in tables.iter_mut().zip(output.partitions) {
                table.extend(partition);
            }
            sheets.push(SheetCount {
                sheet: sheet_name,
                records,
            });
        }

        let tables = self
            .layout
            .outputs
            .iter()
            .zip(tables)
            .map(|(spec, table)| PartitionTable {
                partition: spec.partition.clone(),
                file_name: spec.file_name.clone(),
                table,
            })
            .collect();

        Ok(Extraction { tables, sheets })
    }
}
