use std::collections::BTreeMap;

use kpimap_model::{KpiCatalog, KpiDefinition, MappingKey, MappingTarget};

use crate::error::SessionError;
use crate::registry::TableRegistry;

/// Assignments of KPI required fields to table columns.
///
/// An absent entry means "unmapped"; there is no sentinel value.
#[derive(Debug, Clone, Default)]
pub struct MappingStore {
    entries: BTreeMap<MappingKey, MappingTarget>,
}

impl MappingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a choice, returning the previous target when overwriting.
    pub fn set(&mut self, key: MappingKey, target: MappingTarget) -> Option<MappingTarget> {
        self.entries.insert(key, target)
    }

    /// Return a field to the unmapped state.
    pub fn clear(&mut self, key: &MappingKey) -> Option<MappingTarget> {
        self.entries.remove(key)
    }

    pub fn get(&self, key: &MappingKey) -> Option<&MappingTarget> {
        self.entries.get(key)
    }

    pub fn is_mapped(&self, key: &MappingKey) -> bool {
        self.entries.contains_key(key)
    }

    /// True iff every required field of the KPI has a recorded target.
    pub fn is_complete(&self, kpi: &KpiDefinition) -> bool {
        kpi.required_fields
            .iter()
            .all(|field| self.is_mapped(&MappingKey::new(kpi.name.clone(), field.clone())))
    }

    /// True iff at least one of the given KPIs is incomplete.
    pub fn any_incomplete<'a>(&self, kpis: impl IntoIterator<Item = &'a KpiDefinition>) -> bool {
        kpis.into_iter().any(|kpi| !self.is_complete(kpi))
    }

    pub fn clear_all(&mut self) {
        self.entries.clear();
    }

    /// Defensive check that every target still names a live table/column and
    /// every key still names a cataloged KPI field.
    pub fn validate_references(
        &self,
        registry: &TableRegistry,
        catalog: &KpiCatalog,
    ) -> Vec<SessionError> {
        let mut errors = Vec::new();
        for (key, target) in &self.entries {
            match catalog.get(&key.kpi) {
                None => errors.push(SessionError::UnknownKpi(key.kpi.clone())),
                Some(kpi) if !kpi.required_fields.contains(&key.field) => {
                    errors.push(SessionError::UnknownField {
                        kpi: key.kpi.clone(),
                        field: key.field.clone(),
                    });
                }
                Some(_) => {}
            }
            match registry.get(&target.table) {
                None => errors.push(SessionError::TableNotFound(target.table.clone())),
                Some(table) if !table.has_column(&target.column) => {
                    errors.push(SessionError::ColumnNotFound {
                        table: target.table.clone(),
                        column: target.column.clone(),
                    });
                }
                Some(_) => {}
            }
        }
        errors
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MappingKey, &MappingTarget)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use kpimap_model::Table;

    use super::*;

    fn revenue() -> KpiDefinition {
        KpiDefinition {
            name: "Revenue".to_string(),
            description: String::new(),
            formula: String::new(),
            required_fields: vec!["Sales Amount".to_string(), "Date".to_string()],
        }
    }

    #[test]
    fn completeness_requires_every_field() {
        let kpi = revenue();
        let mut store = MappingStore::new();
        assert!(!store.is_complete(&kpi));

        store.set(
            MappingKey::new("Revenue", "Sales Amount"),
            MappingTarget::new("Orders", "Amount"),
        );
        assert!(!store.is_complete(&kpi));
        assert!(store.any_incomplete([&kpi]));

        store.set(
            MappingKey::new("Revenue", "Date"),
            MappingTarget::new("Orders", "Order Date"),
        );
        assert!(store.is_complete(&kpi));
        assert!(!store.any_incomplete([&kpi]));
    }

    #[test]
    fn clear_returns_field_to_unmapped() {
        let mut store = MappingStore::new();
        let key = MappingKey::new("Revenue", "Date");
        store.set(key.clone(), MappingTarget::new("Orders", "Order Date"));
        assert!(store.is_mapped(&key));

        let removed = store.clear(&key);
        assert_eq!(removed, Some(MappingTarget::new("Orders", "Order Date")));
        assert!(!store.is_mapped(&key));
        assert!(store.clear(&key).is_none());
    }

    #[test]
    fn kpi_with_no_required_fields_is_complete() {
        let kpi = KpiDefinition {
            name: "Static".to_string(),
            description: String::new(),
            formula: String::new(),
            required_fields: vec![],
        };
        assert!(MappingStore::new().is_complete(&kpi));
    }

    #[test]
    fn validate_references_flags_stale_targets() {
        let mut registry = TableRegistry::new();
        registry.register(Table::new("Orders", vec!["Amount".to_string()]));
        let catalog = KpiCatalog::new(vec![revenue()]);

        let mut store = MappingStore::new();
        store.set(
            MappingKey::new("Revenue", "Sales Amount"),
            MappingTarget::new("Orders", "Gone"),
        );
        store.set(
            MappingKey::new("Margin", "Cost"),
            MappingTarget::new("Orders", "Amount"),
        );

        let errors = store.validate_references(&registry, &catalog);
        assert!(errors.contains(&SessionError::ColumnNotFound {
            table: "Orders".to_string(),
            column: "Gone".to_string(),
        }));
        assert!(errors.contains(&SessionError::UnknownKpi("Margin".to_string())));
    }
}
