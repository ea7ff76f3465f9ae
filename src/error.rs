//! Error types for typesync
//!
//! Uses `thiserror` for library errors. Reference extraction is best-effort
//! and never surfaces here; these variants cover collaborator failures and
//! the strict rebuild/differ invariants.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for typesync operations
pub type TypesyncResult<T> = Result<T, TypesyncError>;

/// Main error type for typesync operations
#[derive(Error, Debug)]
pub enum TypesyncError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Grammar could not be loaded into the parser
    #[error("parser setup failed: {message}")]
    ParserSetup { message: String },

    /// Source text could not be parsed at all
    #[error("failed to parse {file}")]
    Parse { file: String },

    /// Typings payload has no `declare namespace` block
    #[error("no namespace declaration found in {file}")]
    MissingNamespace { file: String },

    /// Two declarations with the same name in one module
    #[error("duplicate declaration '{name}' in {file}")]
    DuplicateDeclaration { name: String, file: String },

    /// A live name has no declaration in the fresh module (rebuild invariant)
    #[error("missing declaration: {name}")]
    MissingDeclaration { name: String },

    /// A differ candidate names no declaration in the old module
    #[error("declaration not found: {name}")]
    DeclarationNotFound { name: String },

    /// Configuration file is present but invalid
    #[error("invalid config {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// Service path does not exist
    #[error("service path not found: {path}")]
    ServicePathNotFound { path: PathBuf },
}
