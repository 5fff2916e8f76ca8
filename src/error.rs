//! Error types shared across the analysis pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Everything that can abort a run.
///
/// There is no partial-output mode: the first failure terminates the whole
/// analysis, and the diagnostic names the stage and column it came from.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to open '{}': {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in '{}': {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("invalid number '{value}' in '{}' (row {row}, column {column})", .path.display())]
    Parse {
        path: PathBuf,
        row: usize,
        column: usize,
        value: String,
    },

    #[error("empty table: {}", .0.display())]
    EmptyTable(PathBuf),

    #[error("shape mismatch: {0}")]
    Shape(String),

    #[error("{left} has {left_columns} column(s) but {right} has {right_columns}; input tables must share one column per configuration")]
    ColumnMismatch {
        left: &'static str,
        left_columns: usize,
        right: &'static str,
        right_columns: usize,
    },

    #[error("{stage}: column {column} has {found} value(s), a standard error needs at least 2")]
    InsufficientData {
        stage: &'static str,
        column: usize,
        found: usize,
    },

    #[error("{stage}: division by zero in column {column} ({denominator} is zero)")]
    DivisionByZero {
        stage: &'static str,
        column: usize,
        denominator: &'static str,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
