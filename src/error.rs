use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading catalog files. The matching and search
/// engines themselves never fail.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("File not found at: {0:?}")]
    NotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Column '{0}' not found")]
    MissingColumn(&'static str),

    #[error("Unknown ingredient category '{category}' at row {row}")]
    InvalidCategory { row: usize, category: String },

    #[error("Invalid month '{value}' at row {row}, expected 1 to 12")]
    InvalidMonth { row: usize, value: String },

    #[error("No valid {0} loaded")]
    Empty(&'static str),
}
