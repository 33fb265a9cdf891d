#![deny(unsafe_code)]

pub mod error;
pub mod reader;

pub use error::{IngestError, Result};
pub use reader::{
    DEFAULT_PREVIEW_ROWS, IngestOptions, MAX_HEADER_ROW, MIN_HEADER_ROW, read_table,
};
