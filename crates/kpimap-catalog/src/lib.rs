#![deny(unsafe_code)]

pub mod error;
pub mod loader;

pub use error::{CatalogError, Result};
pub use loader::{REQUIRED_COLUMNS, load_catalog, split_required_fields};
