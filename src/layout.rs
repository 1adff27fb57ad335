//! Fixed-coordinate layout of a progression sheet, expressed as data.
//!
//! A [`Layout`] is what users edit (YAML, letters and A1 addresses). It is
//! compiled by [`Layout::resolve`] into a [`ResolvedLayout`] of grid indices
//! before any sheet is read, so a malformed layout fails up front.

use crate::error::{ExtractError, ExtractResult};
use crate::excel::address::{column_index, CellRef};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Partition used by row ranges that carry no explicit tag
pub const DEFAULT_PARTITION: &str = "default";

/// Rows in a spreadsheet sheet (.ods and .xlsx)
pub const MAX_SHEET_ROWS: usize = 1_048_576;

fn default_partition() -> String {
    DEFAULT_PARTITION.to_string()
}

/// Addresses of the cells shared by every record of a sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataCells {
    pub month_year: String,
    pub sequence: String,
    pub justification: String,
    pub legal_document: String,
}

/// Inclusive span of 1-based rows routed to one partition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowRange {
    pub first: usize,
    pub last: usize,
    #[serde(default = "default_partition")]
    pub partition: String,
}

impl RowRange {
    pub fn new(first: usize, last: usize, partition: &str) -> Self {
        Self {
            first,
            last,
            partition: partition.to_string(),
        }
    }
}

/// One output file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSpec {
    pub partition: String,
    pub file_name: String,
}

impl OutputSpec {
    pub fn new(partition: &str, file_name: &str) -> Self {
        Self {
            partition: partition.to_string(),
            file_name: file_name.to_string(),
        }
    }
}

/// Where everything lives in a source sheet and where records go
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    pub identity_columns: [String; 2],
    pub metadata: MetadataCells,
    pub value_columns: Vec<String>,
    pub rubric: String,
    pub income_type: String,
    pub row_ranges: Vec<RowRange>,
    pub outputs: Vec<OutputSpec>,
}

impl Default for Layout {
    fn default() -> Self {
        Self::dual()
    }
}

impl Layout {
    /// Three value columns (J, N, S); rows 13-63 and 71-121 go to separate files
    pub fn dual() -> Self {
        Self {
            value_columns: vec!["J".to_string(), "N".to_string(), "S".to_string()],
            row_ranges: vec![RowRange::new(13, 63, "ufgd"), RowRange::new(71, 121, "hu")],
            outputs: vec![
                OutputSpec::new("ufgd", "Progressão por Mérito UFGD.xlsx"),
                OutputSpec::new("hu", "Progressão por Mérito HU.xlsx"),
            ],
            ..Self::base()
        }
    }

    /// Two value columns (J, N); both row spans go to one file
    pub fn single() -> Self {
        Self {
            value_columns: vec!["J".to_string(), "N".to_string()],
            row_ranges: vec![
                RowRange::new(13, 63, DEFAULT_PARTITION),
                RowRange::new(71, 121, DEFAULT_PARTITION),
            ],
            outputs: vec![OutputSpec::new(DEFAULT_PARTITION, "resultado_progressao.xlsx")],
            ..Self::base()
        }
    }

    fn base() -> Self {
        Self {
            identity_columns: ["A".to_string(), "B".to_string()],
            metadata: MetadataCells {
                month_year: "C5".to_string(),
                sequence: "C6".to_string(),
                justification: "C9".to_string(),
                legal_document: "C10".to_string(),
            },
            value_columns: Vec::new(),
            rubric: "00001".to_string(),
            income_type: "r".to_string(),
            row_ranges: Vec::new(),
            outputs: Vec::new(),
        }
    }

    /// Load a layout from a YAML file
    pub fn from_yaml_file(path: &Path) -> ExtractResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> ExtractResult<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn to_yaml(&self) -> ExtractResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Validate and compile into grid indices
    pub fn resolve(&self) -> ExtractResult<ResolvedLayout> {
        if self.value_columns.is_empty() {
            return Err(ExtractError::Layout(
                "at least one value column is required".to_string(),
            ));
        }
        if self.outputs.is_empty() {
            return Err(ExtractError::Layout(
                "at least one output is required".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        let mut file_names = HashSet::new();
        for output in &self.outputs {
            if !seen.insert(output.partition.as_str()) {
                return Err(ExtractError::Layout(format!(
                    "partition '{}' is declared more than once",
                    output.partition
                )));
            }
            let name = output.file_name.trim();
            if name.is_empty() || name.contains(['/', '\\']) {
                return Err(ExtractError::Layout(format!(
                    "output file name '{}' must be a plain file name",
                    output.file_name
                )));
            }
            // Case-insensitive file systems would merge these
            if !file_names.insert(name.to_lowercase()) {
                return Err(ExtractError::Layout(format!(
                    "output file name '{}' is used by more than one partition",
                    output.file_name
                )));
            }
        }

        let ranges = self
            .row_ranges
            .iter()
            .map(|range| self.resolve_range(range))
            .collect::<ExtractResult<Vec<_>>>()?;

        Ok(ResolvedLayout {
            identity_columns: [
                column_index(&self.identity_columns[0])?,
                column_index(&self.identity_columns[1])?,
            ],
            metadata: ResolvedMetadata {
                month_year: CellRef::parse(&self.metadata.month_year)?,
                sequence: CellRef::parse(&self.metadata.sequence)?,
                justification: CellRef::parse(&self.metadata.justification)?,
                legal_document: CellRef::parse(&self.metadata.legal_document)?,
            },
            value_columns: self
                .value_columns
                .iter()
                .map(|c| column_index(c))
                .collect::<ExtractResult<Vec<_>>>()?,
            rubric: self.rubric.clone(),
            income_type: self.income_type.clone(),
            ranges,
            outputs: self.outputs.clone(),
        })
    }

    fn resolve_range(&self, range: &RowRange) -> ExtractResult<ResolvedRange> {
        if range.first == 0 || range.last < range.first {
            return Err(ExtractError::Layout(format!(
                "row range {}-{} must be 1-based and ascending",
                range.first, range.last
            )));
        }
        if range.last > MAX_SHEET_ROWS {
            return Err(ExtractError::Layout(format!(
                "row range {}-{} ends past the last sheet row ({})",
                range.first, range.last, MAX_SHEET_ROWS
            )));
        }
        let output = self
            .outputs
            .iter()
            .position(|o| o.partition == range.partition)
            .ok_or_else(|| {
                ExtractError::Layout(format!(
                    "row range {}-{} targets undeclared partition '{}'",
                    range.first, range.last, range.partition
                ))
            })?;
        Ok(ResolvedRange {
            first: range.first,
            last: range.last,
            output,
        })
    }
}

/// Grid positions of the shared metadata cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedMetadata {
    pub month_year: CellRef,
    pub sequence: CellRef,
    pub justification: CellRef,
    pub legal_document: CellRef,
}

/// A row range with its partition replaced by an index into `outputs`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedRange {
    pub first: usize,
    pub last: usize,
    pub output: usize,
}

impl ResolvedRange {
    /// 1-based row numbers, ascending
    pub fn rows(&self) -> std::ops::RangeInclusive<usize> {
        self.first..=self.last
    }
}

/// A validated layout in grid indices
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLayout {
    pub identity_columns: [usize; 2],
    pub metadata: ResolvedMetadata,
    pub value_columns: Vec<usize>,
    pub rubric: String,
    pub income_type: String,
    pub ranges: Vec<ResolvedRange>,
    pub outputs: Vec<OutputSpec>,
}
