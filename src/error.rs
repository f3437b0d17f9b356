use thiserror::Error;

#[derive(Debug, Error)]
pub enum HweError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Missing required column '{column}' (header has: {available})")]
    MissingColumn { column: String, available: String },

    #[error("Line {line}: expected at least {expected} fields, found {found}")]
    FieldCount {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Line {line}: invalid count in column '{column}': '{value}'")]
    InvalidCount {
        line: usize,
        column: String,
        value: String,
    },

    #[error("No header line found")]
    MissingHeader,

    #[error("Table contains no variant rows")]
    EmptyTable,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, HweError>;
