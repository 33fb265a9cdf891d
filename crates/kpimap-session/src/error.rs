use thiserror::Error;

/// Errors raised by session event handlers and reference validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("table not found: {0}")]
    TableNotFound(String),

    #[error("table '{table}' has no column '{column}'")]
    ColumnNotFound { table: String, column: String },

    #[error("relationship index {index} is out of range (length {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("no KPI catalog loaded")]
    NoCatalog,

    #[error("KPI not found in catalog: {0}")]
    UnknownKpi(String),

    #[error("KPI '{kpi}' has no required field '{field}'")]
    UnknownField { kpi: String, field: String },
}

pub type Result<T> = std::result::Result<T, SessionError>;
