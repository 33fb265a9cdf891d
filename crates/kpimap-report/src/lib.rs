#![deny(unsafe_code)]

pub mod dot;
pub mod mappings;
pub mod relationships;

pub use dot::render_relationships_dot;
pub use mappings::render_kpi_mappings;
pub use relationships::{RELATIONSHIPS_HEADER, render_relationships};
