use std::collections::BTreeSet;

use kpimap_model::{Relationship, RelationshipPatch};

use crate::error::{Result, SessionError};
use crate::registry::TableRegistry;

/// Ordered list of declared relationships.
///
/// Indices are positional: removing an entry renumbers everything after it
/// while preserving relative order.
#[derive(Debug, Clone, Default)]
pub struct RelationshipList {
    entries: Vec<Relationship>,
}

impl RelationshipList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a blank relationship record and return its index.
    pub fn add(&mut self) -> usize {
        self.entries.push(Relationship::default());
        self.entries.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&Relationship> {
        self.entries.get(index)
    }

    pub fn update(&mut self, index: usize, patch: RelationshipPatch) -> Result<()> {
        let len = self.entries.len();
        let entry = self
            .entries
            .get_mut(index)
            .ok_or(SessionError::IndexOutOfRange { index, len })?;
        entry.apply(patch);
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<Relationship> {
        if index >= self.entries.len() {
            return Err(SessionError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        Ok(self.entries.remove(index))
    }

    /// Registered tables referenced by no relationship, in registry order.
    ///
    /// Partially filled relationships count: a set source or target already
    /// references its table. An empty result means every table is connected.
    pub fn connectivity_gap(&self, registry: &TableRegistry) -> Vec<String> {
        let referenced: BTreeSet<&str> = self
            .entries
            .iter()
            .flat_map(Relationship::referenced_tables)
            .collect();
        registry
            .names()
            .filter(|name| !referenced.contains(name))
            .map(str::to_string)
            .collect()
    }

    /// Defensive check that every referenced table and column still exists.
    pub fn validate_references(&self, registry: &TableRegistry) -> Vec<SessionError> {
        let mut errors = Vec::new();
        for entry in &self.entries {
            check_side(
                registry,
                entry.source_table.as_deref(),
                entry.source_column.as_deref(),
                &mut errors,
            );
            check_side(
                registry,
                entry.target_table.as_deref(),
                entry.target_column.as_deref(),
                &mut errors,
            );
        }
        errors
    }

    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[Relationship] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn check_side(
    registry: &TableRegistry,
    table: Option<&str>,
    column: Option<&str>,
    errors: &mut Vec<SessionError>,
) {
    let Some(table) = table else {
        return;
    };
    let Some(registered) = registry.get(table) else {
        errors.push(SessionError::TableNotFound(table.to_string()));
        return;
    };
    if let Some(column) = column {
        if !registered.has_column(column) {
            errors.push(SessionError::ColumnNotFound {
                table: table.to_string(),
                column: column.to_string(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use kpimap_model::{Cardinality, Table};

    use super::*;

    fn patch(source: &str, target: &str) -> RelationshipPatch {
        RelationshipPatch {
            source_table: Some(source.to_string()),
            target_table: Some(target.to_string()),
            ..RelationshipPatch::default()
        }
    }

    #[test]
    fn add_returns_sequential_indices() {
        let mut list = RelationshipList::new();
        assert_eq!(list.add(), 0);
        assert_eq!(list.add(), 1);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn update_out_of_range_fails() {
        let mut list = RelationshipList::new();
        let err = list.update(0, RelationshipPatch::default()).unwrap_err();
        assert_eq!(err, SessionError::IndexOutOfRange { index: 0, len: 0 });
    }

    #[test]
    fn remove_preserves_relative_order() {
        let mut list = RelationshipList::new();
        for name in ["A", "B", "C"] {
            let idx = list.add();
            list.update(idx, patch(name, "X")).unwrap();
        }

        let removed = list.remove(1).unwrap();
        assert_eq!(removed.source_table.as_deref(), Some("B"));
        assert_eq!(list.len(), 2);
        assert_eq!(list.get(0).unwrap().source_table.as_deref(), Some("A"));
        assert_eq!(list.get(1).unwrap().source_table.as_deref(), Some("C"));
    }

    #[test]
    fn gap_covers_every_table_when_no_relationships() {
        let mut registry = TableRegistry::new();
        registry.register(Table::new("Orders", vec![]));
        registry.register(Table::new("Customers", vec![]));

        let list = RelationshipList::new();
        assert_eq!(list.connectivity_gap(&registry), vec!["Orders", "Customers"]);
    }

    #[test]
    fn gap_shrinks_as_tables_are_referenced() {
        let mut registry = TableRegistry::new();
        registry.register(Table::new("Orders", vec![]));
        registry.register(Table::new("Customers", vec![]));
        registry.register(Table::new("Products", vec![]));

        let mut list = RelationshipList::new();
        let idx = list.add();
        list.update(idx, patch("Orders", "Customers")).unwrap();

        assert_eq!(list.connectivity_gap(&registry), vec!["Products"]);
    }

    #[test]
    fn partially_filled_relationship_still_references_its_table() {
        let mut registry = TableRegistry::new();
        registry.register(Table::new("Orders", vec![]));

        let mut list = RelationshipList::new();
        let idx = list.add();
        list.update(
            idx,
            RelationshipPatch {
                source_table: Some("Orders".to_string()),
                cardinality: Some(Cardinality::OneToOne),
                ..RelationshipPatch::default()
            },
        )
        .unwrap();

        assert!(list.connectivity_gap(&registry).is_empty());
    }

    #[test]
    fn validate_references_reports_dangling_names() {
        let mut registry = TableRegistry::new();
        registry.register(Table::new("Orders", vec!["Amount".to_string()]));

        let mut list = RelationshipList::new();
        let idx = list.add();
        list.update(
            idx,
            RelationshipPatch {
                source_table: Some("Orders".to_string()),
                source_column: Some("Ghost".to_string()),
                target_table: Some("Missing".to_string()),
                ..RelationshipPatch::default()
            },
        )
        .unwrap();

        let errors = list.validate_references(&registry);
        assert_eq!(errors.len(), 2);
        assert!(errors.contains(&SessionError::ColumnNotFound {
            table: "Orders".to_string(),
            column: "Ghost".to_string(),
        }));
        assert!(errors.contains(&SessionError::TableNotFound("Missing".to_string())));
    }
}
