//! KPI catalog parsing.
//!
//! The catalog is a CSV with one row per KPI and four required columns.
//! Schema validation reports every missing column in a single error rather
//! than failing on the first one.

use std::collections::BTreeSet;
use std::path::Path;

use csv::ReaderBuilder;

use kpimap_model::{KpiCatalog, KpiDefinition};

use crate::error::{CatalogError, Result};

/// Column names the catalog must carry, in reporting order.
pub const REQUIRED_COLUMNS: [&str; 4] = [
    "KPI Name",
    "KPI Description",
    "KPI Formula",
    "Required Fields",
];

/// Split a `Required Fields` cell on `;`, trimming each piece and dropping
/// empty ones.
pub fn split_required_fields(raw: &str) -> Vec<String> {
    raw.split(';')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}

fn normalize_header(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

fn header_index(headers: &[String], name: &str) -> Option<usize> {
    headers.iter().position(|h| h == name)
}

fn cell(row: &csv::ByteRecord, idx: Option<usize>) -> String {
    idx.and_then(|i| row.get(i))
        .map(|field| String::from_utf8_lossy(field).trim().to_string())
        .unwrap_or_default()
}

/// Load and validate a KPI catalog file.
///
/// Row order is preserved. Rows with an empty KPI name are skipped, and a
/// duplicate name keeps its first definition.
pub fn load_catalog(path: &Path) -> Result<KpiCatalog> {
    let bytes = std::fs::read(path).map_err(|e| CatalogError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes.as_slice());

    let headers: Vec<String> = reader
        .byte_headers()
        .map_err(|e| CatalogError::Csv {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .iter()
        .map(|field| normalize_header(&String::from_utf8_lossy(field)))
        .collect();

    let idx_name = header_index(&headers, REQUIRED_COLUMNS[0]);
    let idx_description = header_index(&headers, REQUIRED_COLUMNS[1]);
    let idx_formula = header_index(&headers, REQUIRED_COLUMNS[2]);
    let idx_fields = header_index(&headers, REQUIRED_COLUMNS[3]);

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .zip([idx_name, idx_description, idx_formula, idx_fields])
        .filter(|(_, idx)| idx.is_none())
        .map(|(name, _)| (*name).to_string())
        .collect();
    if !missing.is_empty() {
        return Err(CatalogError::MissingColumns {
            path: path.to_path_buf(),
            columns: missing,
        });
    }

    let mut seen: BTreeSet<String> = BTreeSet::new();
    let mut kpis: Vec<KpiDefinition> = Vec::new();
    for row in reader.byte_records() {
        let row = row.map_err(|e| CatalogError::Csv {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let name = cell(&row, idx_name);
        if name.is_empty() {
            continue;
        }
        if !seen.insert(name.clone()) {
            tracing::warn!(kpi = %name, "duplicate KPI name in catalog, keeping first definition");
            continue;
        }

        kpis.push(KpiDefinition {
            name,
            description: cell(&row, idx_description),
            formula: cell(&row, idx_formula),
            required_fields: split_required_fields(&cell(&row, idx_fields)),
        });
    }

    tracing::debug!(path = %path.display(), kpis = kpis.len(), "loaded KPI catalog");
    Ok(KpiCatalog::new(kpis))
}
