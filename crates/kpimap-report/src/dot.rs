//! Graphviz DOT rendering of the relationship graph.

use kpimap_model::Relationship;
use kpimap_session::TableRegistry;

fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Render registered tables as nodes and complete relationships as labelled
/// directed edges.
pub fn render_relationships_dot(
    registry: &TableRegistry,
    relationships: &[Relationship],
) -> String {
    let mut out = String::new();
    out.push_str("digraph relationships {\n");
    out.push_str("    rankdir=LR;\n");
    out.push_str("    node [shape=box];\n");
    for name in registry.names() {
        out.push_str(&format!("    \"{}\";\n", escape(name)));
    }
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
            "    \"{}\" -> \"{}\" [label=\"{} -> {} ({})\"];\n",
            escape(source_table),
            escape(target_table),
            escape(source_column),
            escape(target_column),
            cardinality
        ));
    }
    out.push_str("}\n");
    out
}
