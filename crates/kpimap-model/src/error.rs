use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown cardinality label: {0:?}")]
    InvalidCardinality(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
