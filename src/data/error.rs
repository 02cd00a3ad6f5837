use thiserror::Error;

/// Schema and content problems found while loading launch records.
///
/// Loader functions return `anyhow::Result`; these errors travel inside it
/// and can be recovered with `downcast_ref::<DatasetError>()`.
#[derive(Debug, Error, PartialEq)]
pub enum DatasetError {
    #[error("dataset is missing required column '{column}'")]
    MissingColumn { column: String },

    #[error("row {row}, column '{column}': '{value}' {reason}")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
        reason: String,
    },

    #[error("dataset contains no launch records")]
    Empty,

    #[error("unsupported dataset format: .{0}")]
    UnsupportedFormat(String),
}

impl DatasetError {
    pub fn missing(column: &str) -> Self {
        DatasetError::MissingColumn {
            column: column.to_string(),
        }
    }

    pub fn invalid(row: usize, column: &str, value: impl ToString, reason: &str) -> Self {
        DatasetError::InvalidValue {
            row,
            column: column.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}
