use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::types::{ExportResult, KpiSummary, TableSummary};

pub fn print_summary(result: &ExportResult) {
    if result.written.is_empty() {
        println!("Dry run: no files written");
    } else {
        println!("Output: {}", result.output_dir.display());
    }

    print_table_summary(&result.tables);
    println!("Relationships exported: {}", result.relationship_count);
    if !result.connectivity_gap.is_empty() {
        println!(
            "Warning: not referenced by any relationship: {}",
            result.connectivity_gap.join(", ")
        );
    }

    print_kpi_summary(&result.kpis);
    if result.incomplete_warning {
        println!("Warning: some selected KPIs have unmapped required fields");
    }

    for path in &result.written {
        println!("Wrote {}", path.display());
    }

    if !result.errors.is_empty() {
        eprintln!("Errors:");
        for error in &result.errors {
            eprintln!("- {error}");
        }
    }
}

fn print_table_summary(tables: &[TableSummary]) {
    if tables.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("File"),
        header_cell("Columns"),
        header_cell("Rows Sampled"),
        header_cell("Status"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for summary in tables {
        let status = match &summary.error {
            Some(message) => Cell::new(message).fg(Color::Red),
            None => Cell::new("loaded").fg(Color::Green),
        };
        table.add_row(vec![
            Cell::new(&summary.name).add_attribute(Attribute::Bold),
            Cell::new(summary.path.display()),
            Cell::new(summary.columns),
            Cell::new(summary.sampled_rows),
            status,
        ]);
    }
    println!("{table}");
}

fn print_kpi_summary(kpis: &[KpiSummary]) {
    if kpis.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("KPI"),
        header_cell("Required"),
        header_cell("Mapped"),
        header_cell("Complete"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Center);
    for kpi in kpis {
        let complete = if kpi.complete {
            Cell::new("✓")
                .fg(Color::Green)
                .add_attribute(Attribute::Bold)
        } else {
            Cell::new("✗").fg(Color::Yellow)
        };
        table.add_row(vec![
            Cell::new(&kpi.name).add_attribute(Attribute::Bold),
            Cell::new(kpi.required_fields),
            Cell::new(kpi.mapped_fields),
            complete,
        ]);
    }
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}
