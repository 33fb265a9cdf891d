use std::path::PathBuf;

/// Outcome of replaying one project file.
#[derive(Debug)]
pub struct ExportResult {
    pub output_dir: PathBuf,
    pub tables: Vec<TableSummary>,
    /// Complete relationships, ready for export.
    pub relationship_count: usize,
    /// Registered tables referenced by no relationship.
    pub connectivity_gap: Vec<String>,
    pub kpis: Vec<KpiSummary>,
    /// At least one selected KPI has unmapped required fields.
    pub incomplete_warning: bool,
    /// Artifacts written (empty on dry runs).
    pub written: Vec<PathBuf>,
    pub errors: Vec<String>,
    pub has_errors: bool,
}

#[derive(Debug)]
pub struct TableSummary {
    pub name: String,
    pub path: PathBuf,
    pub columns: usize,
    pub sampled_rows: usize,
    /// Parse failure for this file, if any.
    pub error: Option<String>,
}

#[derive(Debug)]
pub struct KpiSummary {
    pub name: String,
    pub required_fields: usize,
    pub mapped_fields: usize,
    pub complete: bool,
}
