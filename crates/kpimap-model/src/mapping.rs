use serde::{Deserialize, Serialize};

/// Composite key for one required-field slot of one KPI.
///
/// Kept structured rather than a concatenated string so the mapping store
/// can never confuse `("A", "B C")` with `("A B", "C")`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MappingKey {
    pub kpi: String,
    pub field: String,
}

impl MappingKey {
    pub fn new(kpi: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            kpi: kpi.into(),
            field: field.into(),
        }
    }
}

/// The table/column pair a required field was mapped onto.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingTarget {
    pub table: String,
    pub column: String,
}

impl MappingTarget {
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
        }
    }
}
