//! TOML project file: a declarative description of one mapping session.
//!
//! The CLI replays the manifest through the session event handlers, so the
//! same validation runs whether the state is built interactively or from a
//! file.
//!
//! ```toml
//! [[tables]]
//! name = "Orders"
//! path = "orders.csv"
//! header-row = 4
//!
//! [[relationships]]
//! source-table = "Orders"
//! source-column = "CustomerId"
//! target-table = "Customers"
//! target-column = "Id"
//! cardinality = "many-to-one"
//!
//! [catalog]
//! path = "kpis.csv"
//! selected = ["Revenue"]
//!
//! [[mappings]]
//! kpi = "Revenue"
//! field = "Sales Amount"
//! table = "Orders"
//! column = "Amount"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use kpimap_model::Cardinality;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct ProjectManifest {
    #[serde(default)]
    pub tables: Vec<TableEntry>,
    #[serde(default)]
    pub relationships: Vec<RelationshipEntry>,
    pub catalog: Option<CatalogEntry>,
    #[serde(default)]
    pub mappings: Vec<MappingEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct TableEntry {
    /// Registry name for the table.
    pub name: String,
    /// Data file path, relative to the project file.
    pub path: PathBuf,
    /// 1-based row index of the header line.
    #[serde(default = "default_header_row")]
    pub header_row: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct RelationshipEntry {
    pub source_table: String,
    pub source_column: String,
    pub target_table: String,
    pub target_column: String,
    pub cardinality: Cardinality,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct CatalogEntry {
    /// Catalog CSV path, relative to the project file.
    pub path: PathBuf,
    /// KPI names to include in the mapping export.
    #[serde(default)]
    pub selected: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct MappingEntry {
    pub kpi: String,
    pub field: String,
    pub table: String,
    pub column: String,
}

fn default_header_row() -> usize {
    kpimap_ingest::MIN_HEADER_ROW
}

/// Load and parse a project file.
pub fn load_manifest(path: &Path) -> Result<ProjectManifest> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("read project file {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("parse project file {}", path.display()))
}

/// Resolve a manifest-relative path against the project file's directory.
pub fn resolve_path(project: &Path, entry: &Path) -> PathBuf {
    if entry.is_absolute() {
        return entry.to_path_buf();
    }
    match project.parent() {
        Some(base) => base.join(entry),
        None => entry.to_path_buf(),
    }
}
