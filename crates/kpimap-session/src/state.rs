//! The explicit session state.
//!
//! One [`Session`] value owns everything a run accumulates: loaded tables,
//! declared relationships, the KPI catalog, KPI selections, and field
//! mappings. Every user action maps to one handler method; there is no
//! ambient global state.

use kpimap_model::{
    KpiCatalog, KpiDefinition, MappingKey, MappingTarget, Relationship, RelationshipPatch, Table,
};

use crate::error::{Result, SessionError};
use crate::mappings::MappingStore;
use crate::registry::TableRegistry;
use crate::relationships::RelationshipList;

#[derive(Debug, Clone, Default)]
pub struct Session {
    tables: TableRegistry,
    relationships: RelationshipList,
    catalog: Option<KpiCatalog>,
    selected_kpis: Vec<String>,
    mappings: MappingStore,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    // ---- tables ----

    /// Register a loaded table; an existing name is replaced in place.
    pub fn register_table(&mut self, table: Table) -> bool {
        self.tables.register(table)
    }

    pub fn tables(&self) -> &TableRegistry {
        &self.tables
    }

    // ---- relationships ----

    /// Start a new blank relationship; returns its index.
    pub fn add_relationship(&mut self) -> usize {
        self.relationships.add()
    }

    /// Apply a partial edit to a relationship.
    ///
    /// Table names in the patch must be registered. Column names are checked
    /// against their side's table when that table is known; a column set
    /// before its table is accepted and caught later by
    /// [`Session::validate_references`].
    pub fn update_relationship(&mut self, index: usize, patch: RelationshipPatch) -> Result<()> {
        if let Some(table) = patch.source_table.as_deref() {
            if !self.tables.contains(table) {
                return Err(SessionError::TableNotFound(table.to_string()));
            }
        }
        if let Some(table) = patch.target_table.as_deref() {
            if !self.tables.contains(table) {
                return Err(SessionError::TableNotFound(table.to_string()));
            }
        }

        let current = self
            .relationships
            .get(index)
            .ok_or(SessionError::IndexOutOfRange {
                index,
                len: self.relationships.len(),
            })?;

        let source_table = patch
            .source_table
            .clone()
            .or_else(|| current.source_table.clone());
        if let (Some(table), Some(column)) = (source_table.as_deref(), patch.source_column.as_deref())
        {
            self.check_column(table, column)?;
        }
        let target_table = patch
            .target_table
            .clone()
            .or_else(|| current.target_table.clone());
        if let (Some(table), Some(column)) = (target_table.as_deref(), patch.target_column.as_deref())
        {
            self.check_column(table, column)?;
        }

        self.relationships.update(index, patch)
    }

    /// Delete a relationship by position; later entries shift down.
    pub fn remove_relationship(&mut self, index: usize) -> Result<Relationship> {
        self.relationships.remove(index)
    }

    pub fn relationships(&self) -> &RelationshipList {
        &self.relationships
    }

    /// Registered tables referenced by no relationship.
    pub fn connectivity_gap(&self) -> Vec<String> {
        self.relationships.connectivity_gap(&self.tables)
    }

    // ---- catalog and selection ----

    /// Install a KPI catalog, dropping selections and mappings made against
    /// any previous catalog.
    pub fn set_catalog(&mut self, catalog: KpiCatalog) {
        if self.catalog.is_some() {
            tracing::info!("replacing KPI catalog; clearing selections and mappings");
        }
        self.catalog = Some(catalog);
        self.selected_kpis.clear();
        self.mappings.clear_all();
    }

    pub fn catalog(&self) -> Option<&KpiCatalog> {
        self.catalog.as_ref()
    }

    /// Mark a KPI for mapping; idempotent.
    pub fn select_kpi(&mut self, name: &str) -> Result<()> {
        let catalog = self.catalog.as_ref().ok_or(SessionError::NoCatalog)?;
        if !catalog.contains(name) {
            return Err(SessionError::UnknownKpi(name.to_string()));
        }
        if !self.selected_kpis.iter().any(|n| n == name) {
            self.selected_kpis.push(name.to_string());
        }
        Ok(())
    }

    /// Unmark a KPI. Recorded mappings are kept; selection only scopes
    /// completeness checks and export.
    pub fn deselect_kpi(&mut self, name: &str) -> bool {
        let before = self.selected_kpis.len();
        self.selected_kpis.retain(|n| n != name);
        self.selected_kpis.len() != before
    }

    pub fn selected_kpis(&self) -> &[String] {
        &self.selected_kpis
    }

    /// Selected KPI definitions in catalog order.
    pub fn selected_definitions(&self) -> Vec<&KpiDefinition> {
        let Some(catalog) = self.catalog.as_ref() else {
            return Vec::new();
        };
        catalog
            .iter()
            .filter(|kpi| self.selected_kpis.iter().any(|n| n == &kpi.name))
            .collect()
    }

    // ---- field mappings ----

    /// Map one required field of a KPI onto a table column.
    pub fn map_field(
        &mut self,
        kpi: &str,
        field: &str,
        target: MappingTarget,
    ) -> Result<Option<MappingTarget>> {
        let catalog = self.catalog.as_ref().ok_or(SessionError::NoCatalog)?;
        let definition = catalog
            .get(kpi)
            .ok_or_else(|| SessionError::UnknownKpi(kpi.to_string()))?;
        if !definition.required_fields.iter().any(|f| f == field) {
            return Err(SessionError::UnknownField {
                kpi: kpi.to_string(),
                field: field.to_string(),
            });
        }
        self.check_column(&target.table, &target.column)?;
        Ok(self.mappings.set(MappingKey::new(kpi, field), target))
    }

    /// Return a field to the unmapped state.
    pub fn clear_mapping(&mut self, kpi: &str, field: &str) -> Option<MappingTarget> {
        self.mappings.clear(&MappingKey::new(kpi, field))
    }

    pub fn mappings(&self) -> &MappingStore {
        &self.mappings
    }

    /// True iff every required field of the named KPI is mapped.
    pub fn is_complete(&self, kpi: &str) -> Result<bool> {
        let catalog = self.catalog.as_ref().ok_or(SessionError::NoCatalog)?;
        let definition = catalog
            .get(kpi)
            .ok_or_else(|| SessionError::UnknownKpi(kpi.to_string()))?;
        Ok(self.mappings.is_complete(definition))
    }

    /// True iff at least one selected KPI is incomplete. Warning-only; never
    /// blocks export.
    pub fn any_incomplete(&self) -> bool {
        self.mappings.any_incomplete(self.selected_definitions())
    }

    // ---- validation ----

    /// Defensive re-check of every stored reference.
    pub fn validate_references(&self) -> Vec<SessionError> {
        let mut errors = self.relationships.validate_references(&self.tables);
        if let Some(catalog) = self.catalog.as_ref() {
            errors.extend(self.mappings.validate_references(&self.tables, catalog));
        }
        errors
    }

    fn check_column(&self, table: &str, column: &str) -> Result<()> {
        let registered = self
            .tables
            .get(table)
            .ok_or_else(|| SessionError::TableNotFound(table.to_string()))?;
        if !registered.has_column(column) {
            return Err(SessionError::ColumnNotFound {
                table: table.to_string(),
                column: column.to_string(),
            });
        }
        Ok(())
    }
}
