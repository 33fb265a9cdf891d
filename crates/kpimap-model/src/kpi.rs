use serde::{Deserialize, Serialize};

/// A named metric definition from the KPI catalog.
///
/// The formula is opaque text: it is carried through to exports but never
/// evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiDefinition {
    pub name: String,
    pub description: String,
    pub formula: String,
    /// Field names this KPI needs mapped, in catalog order.
    pub required_fields: Vec<String>,
}

/// An ordered KPI catalog with unique names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiCatalog {
    kpis: Vec<KpiDefinition>,
}

impl KpiCatalog {
    pub fn new(kpis: Vec<KpiDefinition>) -> Self {
        Self { kpis }
    }

    pub fn get(&self, name: &str) -> Option<&KpiDefinition> {
        self.kpis.iter().find(|kpi| kpi.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// KPI names in catalog order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.kpis.iter().map(|kpi| kpi.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &KpiDefinition> {
        self.kpis.iter()
    }

    pub fn len(&self) -> usize {
        self.kpis.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kpis.is_empty()
    }
}
