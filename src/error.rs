use std::path::PathBuf;
use thiserror::Error;

pub type ExtractResult<T> = Result<T, ExtractError>;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Invalid column letters: '{0}'")]
    InvalidColumn(String),

    #[error("Invalid cell address: '{0}'")]
    InvalidCellAddress(String),

    #[error("Source file not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error(
        "Failed to open '{}' as an OpenDocument spreadsheet: {detail}\n\
         Verify the file is a valid .ods workbook (ODF reader support is built in)",
        path.display()
    )]
    SourceOpen { path: PathBuf, detail: String },

    #[error(
        "Failed to write '{}': {detail}\n\
         Check that the destination folder is writable and the file is not open in another program",
        path.display()
    )]
    OutputWrite { path: PathBuf, detail: String },

    #[error("Layout error: {0}")]
    Layout(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
