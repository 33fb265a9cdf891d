#![deny(unsafe_code)]

pub mod error;
pub mod kpi;
pub mod mapping;
pub mod relationship;
pub mod table;

pub use error::{ModelError, Result};
pub use kpi::{KpiCatalog, KpiDefinition};
pub use mapping::{MappingKey, MappingTarget};
pub use relationship::{Cardinality, Relationship, RelationshipPatch};
pub use table::Table;
