use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Invalid argument for '{what}': {value}")]
    InvalidArgument { what: &'static str, value: String },

    #[error("Schema mismatch: column '{column}' missing from {table} table")]
    SchemaMismatch { column: String, table: &'static str },

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type ReportResult<T> = Result<T, ReportError>;
