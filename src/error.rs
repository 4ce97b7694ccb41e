//! Error types for the migration tool.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for migration operations.
#[derive(Error, Debug)]
pub enum MigrateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Glob pattern error: {0}")]
    Glob(#[from] globset::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Tree-sitter parse error for {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Tree-sitter query error: {0}")]
    Query(#[from] tree_sitter::QueryError),

    #[error("Language not supported: {0}")]
    UnsupportedLanguage(String),

    #[error("No Kotlin sources matched the specified criteria")]
    NoFilesMatched,

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("{path}: setContentView argument '{argument}' does not resolve to an R.layout field")]
    UnresolvedLayout { path: PathBuf, argument: String },

    #[error("Edit plan conflict: {message}")]
    PlanConflict { message: String },
}

/// A specialized Result type for migration operations.
pub type Result<T> = std::result::Result<T, MigrateError>;
