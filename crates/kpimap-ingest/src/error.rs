use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    #[error("{path} contains no rows")]
    EmptyCsv { path: PathBuf },

    #[error("no header found in {path} at row {header_row}")]
    NoHeaderDetected { path: PathBuf, header_row: usize },

    #[error("header row {given} is out of range (1-10)")]
    HeaderRowOutOfRange { given: usize },
}

pub type Result<T> = std::result::Result<T, IngestError>;
