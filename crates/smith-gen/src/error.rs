//! Generation error types for smith-gen.

use std::path::PathBuf;

use smith_parser::ParserError;

/// Errors from merging missing tests into a test-class tree.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    #[error("{origin} declares no class to merge into")]
    NoClass { origin: String },
}

/// Errors from the generation pipeline.
///
/// `MissingTemplate` and `InvalidTemplate` abort a run; the other variants
/// only skip the class they occurred for.
#[derive(Debug, thiserror::Error)]
pub enum GenError {
    #[error("template {path} cannot be read: {source}")]
    MissingTemplate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("template {path} is invalid: {reason}")]
    InvalidTemplate { path: PathBuf, reason: String },

    #[error(transparent)]
    Parse(#[from] ParserError),

    #[error(transparent)]
    Merge(#[from] MergeError),

    #[error("failed to write {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
