use kpimap_model::Table;

use crate::error::{Result, SessionError};

/// Insertion-ordered registry of loaded tables, keyed by user-chosen name.
///
/// Re-registering an existing name replaces the entry in place, so the
/// table keeps its position in listings.
#[derive(Debug, Clone, Default)]
pub struct TableRegistry {
    tables: Vec<Table>,
}

impl TableRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a table. Returns true when an existing entry with
    /// the same name was replaced.
    pub fn register(&mut self, table: Table) -> bool {
        match self.tables.iter().position(|t| t.name == table.name) {
            Some(idx) => {
                tracing::warn!(table = %table.name, "replacing previously registered table");
                self.tables[idx] = table;
                true
            }
            None => {
                self.tables.push(table);
                false
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Ordered column names of a registered table.
    pub fn columns_of(&self, name: &str) -> Result<&[String]> {
        self.get(name)
            .map(|t| t.columns.as_slice())
            .ok_or_else(|| SessionError::TableNotFound(name.to_string()))
    }

    /// Registered names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tables.iter().map(|t| t.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Table> {
        self.tables.iter()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
