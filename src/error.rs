//! Error types for the flowsmith library surface.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for flowsmith operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading, extracting or generating.
#[derive(Debug, Error)]
pub enum Error {
    /// Source file not found.
    #[error("Module not found: {0}")]
    NotFound(PathBuf),

    /// Path does not reference a Python source file.
    #[error("Not a Python file: {0}")]
    NotPythonSource(PathBuf),

    /// The module body could not be parsed.
    #[error("Error loading module {path}: {message}")]
    Load { path: PathBuf, message: String },

    /// Directory expected but something else was given.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Extractor called on a function without `@activity` metadata.
    #[error("Function '{0}' is not decorated with @activity")]
    UndecoratedActivity(String),

    /// Extractor called on a class without `@workflow` metadata.
    #[error("Class '{0}' is not decorated with @workflow")]
    UndecoratedWorkflow(String),

    /// Conversion requires at least one workflow.
    #[error("No workflows found. At least one @workflow decorated class is required")]
    NoWorkflowFound,

    /// Project scaffolding refuses to overwrite an existing directory.
    #[error("Directory '{0}' already exists")]
    OutputExists(PathBuf),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
