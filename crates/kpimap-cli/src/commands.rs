use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::Table as DisplayTable;
use tracing::{info, warn};

use kpimap_catalog::load_catalog;
use kpimap_ingest::{IngestOptions, read_table};
use kpimap_model::{MappingKey, MappingTarget, RelationshipPatch};
use kpimap_report::{render_kpi_mappings, render_relationships, render_relationships_dot};
use kpimap_session::Session;

use crate::cli::{CatalogArgs, ExportArgs, PreviewArgs};
use crate::project::{ProjectManifest, load_manifest, resolve_path};
use crate::summary::apply_table_style;
use crate::types::{ExportResult, KpiSummary, TableSummary};

pub fn run_preview(args: &PreviewArgs) -> Result<()> {
    let name = table_name_for(&args.file);
    let options = IngestOptions::default()
        .with_header_row(args.header_row)
        .with_preview_rows(args.rows);
    let table = read_table(&args.file, &name, &options)?;

    let mut display = DisplayTable::new();
    display.set_header(table.columns.clone());
    apply_table_style(&mut display);
    for row in &table.sample_rows {
        display.add_row(row.clone());
    }
    println!("{display}");
    println!(
        "{}: {} columns, {} sampled rows (header row {})",
        table.name,
        table.columns.len(),
        table.sample_rows.len(),
        table.header_row
    );
    Ok(())
}

pub fn run_catalog(args: &CatalogArgs) -> Result<()> {
    let catalog = load_catalog(&args.catalog)?;

    let mut display = DisplayTable::new();
    display.set_header(vec!["KPI", "Description", "Formula", "Required Fields"]);
    apply_table_style(&mut display);
    for kpi in catalog.iter() {
        display.add_row(vec![
            kpi.name.clone(),
            kpi.description.clone(),
            kpi.formula.clone(),
            kpi.required_fields.join("; "),
        ]);
    }
    println!("{display}");
    println!("{} KPI definitions", catalog.len());
    Ok(())
}

pub fn run_export(args: &ExportArgs) -> Result<ExportResult> {
    let manifest = load_manifest(&args.project)?;
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| resolve_path(&args.project, Path::new("output")));

    let mut session = Session::new();
    let mut errors: Vec<String> = Vec::new();

    let tables = load_tables(&mut session, &manifest, &args.project, &mut errors);
    declare_relationships(&mut session, &manifest, &mut errors);

    let connectivity_gap = session.connectivity_gap();
    if !connectivity_gap.is_empty() {
        warn!(
            tables = %connectivity_gap.join(", "),
            "tables not referenced by any relationship"
        );
    }

    apply_catalog(&mut session, &manifest, &args.project, &mut errors);

    for error in session.validate_references() {
        errors.push(error.to_string());
    }

    let kpis: Vec<KpiSummary> = session
        .selected_definitions()
        .into_iter()
        .map(|kpi| {
            let mapped = kpi
                .required_fields
                .iter()
                .filter(|field| {
                    session
                        .mappings()
                        .is_mapped(&MappingKey::new(kpi.name.clone(), (*field).clone()))
                })
                .count();
            KpiSummary {
                name: kpi.name.clone(),
                required_fields: kpi.required_fields.len(),
                mapped_fields: mapped,
                complete: mapped == kpi.required_fields.len(),
            }
        })
        .collect();
    let incomplete_warning = session.any_incomplete();

    let mut written = Vec::new();
    if !args.dry_run {
        std::fs::create_dir_all(&output_dir)
            .with_context(|| format!("create output directory {}", output_dir.display()))?;

        let relationships_txt = output_dir.join("relationships.txt");
        std::fs::write(
            &relationships_txt,
            render_relationships(session.relationships().as_slice()),
        )
        .with_context(|| format!("write {}", relationships_txt.display()))?;
        written.push(relationships_txt);

        let relationships_dot = output_dir.join("relationships.dot");
        std::fs::write(
            &relationships_dot,
            render_relationships_dot(session.tables(), session.relationships().as_slice()),
        )
        .with_context(|| format!("write {}", relationships_dot.display()))?;
        written.push(relationships_dot);

        if session.catalog().is_some() {
            let mappings_txt = output_dir.join("kpi_mappings.txt");
            std::fs::write(
                &mappings_txt,
                render_kpi_mappings(&session.selected_definitions(), session.mappings()),
            )
            .with_context(|| format!("write {}", mappings_txt.display()))?;
            written.push(mappings_txt);
        }

        for path in &written {
            info!(path = %path.display(), "wrote export");
        }
    }

    let relationship_count = session
        .relationships()
        .iter()
        .filter(|r| r.is_complete())
        .count();
    let has_errors = !errors.is_empty();

    Ok(ExportResult {
        output_dir,
        tables,
        relationship_count,
        connectivity_gap,
        kpis,
        incomplete_warning,
        written,
        errors,
        has_errors,
    })
}

/// Load every declared table; a file that fails to parse is reported and
/// skipped without aborting the rest.
fn load_tables(
    session: &mut Session,
    manifest: &ProjectManifest,
    project: &Path,
    errors: &mut Vec<String>,
) -> Vec<TableSummary> {
    let mut summaries = Vec::new();
    for entry in &manifest.tables {
        let path = resolve_path(project, &entry.path);
        let options = IngestOptions::default().with_header_row(entry.header_row);
        match read_table(&path, &entry.name, &options) {
            Ok(table) => {
                summaries.push(TableSummary {
                    name: entry.name.clone(),
                    path,
                    columns: table.columns.len(),
                    sampled_rows: table.sample_rows.len(),
                    error: None,
                });
                session.register_table(table);
            }
            Err(error) => {
                errors.push(format!("table '{}': {error}", entry.name));
                summaries.push(TableSummary {
                    name: entry.name.clone(),
                    path,
                    columns: 0,
                    sampled_rows: 0,
                    error: Some(error.to_string()),
                });
            }
        }
    }
    summaries
}

fn declare_relationships(
    session: &mut Session,
    manifest: &ProjectManifest,
    errors: &mut Vec<String>,
) {
    for (position, entry) in manifest.relationships.iter().enumerate() {
        let index = session.add_relationship();
        let patch = RelationshipPatch {
            source_table: Some(entry.source_table.clone()),
            source_column: Some(entry.source_column.clone()),
            target_table: Some(entry.target_table.clone()),
            target_column: Some(entry.target_column.clone()),
            cardinality: Some(entry.cardinality),
        };
        if let Err(error) = session.update_relationship(index, patch) {
            errors.push(format!("relationship #{}: {error}", position + 1));
            // Drop the blank record the failed declaration left behind.
            let _ = session.remove_relationship(index);
        }
    }
}

/// Load the catalog and replay selections and mappings. A catalog schema
/// failure blocks the whole KPI flow.
fn apply_catalog(
    session: &mut Session,
    manifest: &ProjectManifest,
    project: &Path,
    errors: &mut Vec<String>,
) {
    let Some(entry) = &manifest.catalog else {
        return;
    };
    let path = resolve_path(project, &entry.path);
    let catalog = match load_catalog(&path) {
        Ok(catalog) => catalog,
        Err(error) => {
            errors.push(format!("catalog: {error}"));
            return;
        }
    };
    session.set_catalog(catalog);

    for name in &entry.selected {
        if let Err(error) = session.select_kpi(name) {
            errors.push(format!("select '{name}': {error}"));
        }
    }
    for mapping in &manifest.mappings {
        let target = MappingTarget::new(mapping.table.clone(), mapping.column.clone());
        if let Err(error) = session.map_field(&mapping.kpi, &mapping.field, target) {
            errors.push(format!(
                "mapping '{}' / '{}': {error}",
                mapping.kpi, mapping.field
            ));
        }
    }
}

fn table_name_for(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "table".to_string())
}
