use serde::{Deserialize, Serialize};

/// A loaded tabular data file.
///
/// Created once at ingest time and never mutated afterwards. The row sample
/// is bounded at ingest; it exists for preview only and is not the full
/// dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    /// User-chosen name, unique within a session's registry.
    pub name: String,
    /// Column names in file order.
    pub columns: Vec<String>,
    /// Bounded preview of data rows, aligned with `columns`.
    pub sample_rows: Vec<Vec<String>>,
    /// 1-based row index of the header line in the source file.
    pub header_row: usize,
}

impl Table {
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            columns,
            sample_rows: Vec::new(),
            header_row: 1,
        }
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }
}
