use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

//==============================================================================
// Source Cells
//==============================================================================

/// A raw, non-empty cell value as read from a source sheet.
///
/// Empty and error cells are never represented here; they are `None` wherever
/// an `Option<CellValue>` is expected.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Bool(bool),
    /// ISO 8601 date or datetime, e.g. `2025-01-01` or `2025-01-01T08:30:00`
    DateTime(String),
}

impl CellValue {
    /// True when the rendered value is empty after trimming
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Text(s) | CellValue::DateTime(s) => s.trim().is_empty(),
            CellValue::Number(n) => n.is_nan(),
            CellValue::Bool(_) => false,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) | CellValue::DateTime(s) => f.write_str(s),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Bool(true) => f.write_str("True"),
            CellValue::Bool(false) => f.write_str("False"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

/// Present and non-blank
pub fn is_filled(cell: Option<&CellValue>) -> bool {
    cell.is_some_and(|c| !c.is_blank())
}

//==============================================================================
// Output Records
//==============================================================================

/// Output column names, in write order. These are a stable import contract.
pub const TABLE_COLUMNS: [&str; 9] = [
    "A13",
    "B13",
    "MES/ANO",
    "rubrica",
    "rendimento",
    "sequência",
    "valor",
    "justificativa",
    "documento legal",
];

/// Position of `valor` in [`TABLE_COLUMNS`]
pub const VALUE_COLUMN: usize = 6;

/// Cells shared by every record of a sheet (month/year, sequence, ...)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SharedMetadata {
    pub month_year: Option<CellValue>,
    pub sequence: Option<CellValue>,
    pub justification: Option<CellValue>,
    pub legal_document: Option<CellValue>,
}

/// One assembled output row: a single non-zero amount of one data row
#[derive(Debug, Clone, PartialEq)]
pub struct OutputRecord {
    pub identity: [Option<CellValue>; 2],
    pub metadata: SharedMetadata,
    pub rubric: String,
    pub income_type: String,
    /// Positive, rounded to 2 decimal places
    pub value: f64,
}

impl OutputRecord {
    /// Cells in [`TABLE_COLUMNS`] order
    pub fn cells(&self) -> [Option<CellValue>; 9] {
        [
            self.identity[0].clone(),
            self.identity[1].clone(),
            self.metadata.month_year.clone(),
            Some(CellValue::Text(self.rubric.clone())),
            Some(CellValue::Text(self.income_type.clone())),
            self.metadata.sequence.clone(),
            Some(CellValue::Number(self.value)),
            self.metadata.justification.clone(),
            self.metadata.legal_document.clone(),
        ]
    }
}

/// Ordered records sharing the fixed [`TABLE_COLUMNS`] schema
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutputTable {
    pub records: Vec<OutputRecord>,
}

impl OutputTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn extend(&mut self, records: impl IntoIterator<Item = OutputRecord>) {
        self.records.extend(records);
    }
}

//==============================================================================
// Extraction Results
//==============================================================================

/// Records contributed by one sheet, across all partitions
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetCount {
    pub sheet: String,
    pub records: usize,
}

/// The table assembled for one output partition
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionTable {
    pub partition: String,
    pub file_name: String,
    pub table: OutputTable,
}

/// Everything one workbook run produces
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    /// One entry per configured partition, in layout order
    pub tables: Vec<PartitionTable>,
    /// One entry per sheet, in file order
    pub sheets: Vec<SheetCount>,
}

impl Extraction {
    pub fn total_records(&self) -> usize {
        self.tables.iter().map(|t| t.table.len()).sum()
    }

    pub fn table(&self, partition: &str) -> Option<&OutputTable> {
        self.tables
            .iter()
            .find(|t| t.partition == partition)
            .map(|t| &t.table)
    }
}

/// An output file written for one partition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WrittenTable {
    pub partition: String,
    pub path: PathBuf,
    pub records: usize,
}
