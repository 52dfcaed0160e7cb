//! Parser error types for smith-parser.

/// Errors that can occur while reading or parsing a PHP file.
#[derive(Debug, thiserror::Error)]
pub enum ParserError {
    #[error("Parse failed for {path} at {line}:{column}: {message}")]
    Syntax {
        path: String,
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
