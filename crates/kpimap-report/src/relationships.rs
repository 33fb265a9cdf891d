//! Relationship summary export.

use kpimap_model::Relationship;

/// Fixed first line of the relationship export.
pub const RELATIONSHIPS_HEADER: &str = "Table Relationships:";

/// Render the relationship list, one line per complete relationship, in
/// list order. Partially filled records are skipped. An empty list yields
/// exactly the header line.
pub fn render_relationships(relationships: &[Relationship]) -> String {
    let mut out = String::new();
    out.push_str(RELATIONSHIPS_HEADER);
    out.push('\n');
    for relationship in relationships {
        let (
            Some(source_table),
            Some(source_column),
            Some(target_table),
            Some(target_column),
            Some(cardinality),
        ) = (
            relationship.source_table.as_deref(),
            relationship.source_column.as_deref(),
            relationship.target_table.as_deref(),
            relationship.target_column.as_deref(),
            relationship.cardinality,
        )
        else {
            continue;
        };
        out.push_str(&format!(
            "{source_table} ({source_column}) -> {target_table} ({target_column}) [{cardinality}]\n"
        ));
    }
    out
}
