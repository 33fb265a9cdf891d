use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Cardinality label attached to a declared relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cardinality {
    OneToMany,
    ManyToOne,
    OneToOne,
    ManyToMany,
}

impl Cardinality {
    pub const ALL: [Cardinality; 4] = [
        Cardinality::OneToMany,
        Cardinality::ManyToOne,
        Cardinality::OneToOne,
        Cardinality::ManyToMany,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Cardinality::OneToMany => "one-to-many",
            Cardinality::ManyToOne => "many-to-one",
            Cardinality::OneToOne => "one-to-one",
            Cardinality::ManyToMany => "many-to-many",
        }
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Cardinality {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.label() == s.trim())
            .ok_or_else(|| ModelError::InvalidCardinality(s.to_string()))
    }
}

/// A declared link between a column of one table and a column of another.
///
/// Every field starts unset; the record only becomes semantically meaningful
/// once all five are filled in. Partially filled records are kept so a form
/// in progress survives intermediate edits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    pub source_table: Option<String>,
    pub source_column: Option<String>,
    pub target_table: Option<String>,
    pub target_column: Option<String>,
    pub cardinality: Option<Cardinality>,
}

impl Relationship {
    pub fn is_complete(&self) -> bool {
        self.source_table.is_some()
            && self.source_column.is_some()
            && self.target_table.is_some()
            && self.target_column.is_some()
            && self.cardinality.is_some()
    }

    /// Table names this relationship references, set fields only.
    pub fn referenced_tables(&self) -> impl Iterator<Item = &str> {
        self.source_table
            .as_deref()
            .into_iter()
            .chain(self.target_table.as_deref())
    }
}

/// Partial update applied to one relationship; `None` fields are untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationshipPatch {
    pub source_table: Option<String>,
    pub source_column: Option<String>,
    pub target_table: Option<String>,
    pub target_column: Option<String>,
    pub cardinality: Option<Cardinality>,
}

impl Relationship {
    pub fn apply(&mut self, patch: RelationshipPatch) {
        if let Some(value) = patch.source_table {
            self.source_table = Some(value);
        }
        if let Some(value) = patch.source_column {
            self.source_column = Some(value);
        }
        if let Some(value) = patch.target_table {
            self.target_table = Some(value);
        }
        if let Some(value) = patch.target_column {
            self.target_column = Some(value);
        }
        if let Some(value) = patch.cardinality {
            self.cardinality = Some(value);
        }
    }
}
