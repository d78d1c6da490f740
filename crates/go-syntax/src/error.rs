use std::path::PathBuf;
use thiserror::Error;

/// Result type for Go syntax operations
pub type Result<T> = std::result::Result<T, SyntaxError>;

/// Errors that can occur while parsing a Go compilation unit
#[derive(Error, Debug)]
pub enum SyntaxError {
    /// The source does not form a valid syntax tree
    #[error("Parse error in {path}:{line}:{column}: {message}")]
    ParseError {
        path: String,
        line: usize,
        column: usize,
        message: String,
    },

    /// The unit has no package clause
    #[error("Missing package clause in {0}")]
    MissingPackage(String),

    /// Failed to read a source file
    #[error("IO error reading {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Tree-sitter error
    #[error("Tree-sitter error: {0}")]
    TreeSitterError(String),
}

impl SyntaxError {
    /// Create a parse error at a 1-based position
    pub fn parse(path: impl Into<String>, line: usize, column: usize, msg: impl Into<String>) -> Self {
        Self::ParseError {
            path: path.into(),
            line,
            column,
            message: msg.into(),
        }
    }

    /// Create a tree-sitter error
    pub fn tree_sitter(msg: impl Into<String>) -> Self {
        Self::TreeSitterError(msg.into())
    }

    /// Create an IO error for a source path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.into(),
            source,
        }
    }

    /// Whether the error comes from malformed source rather than the environment
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::ParseError { .. } | Self::MissingPackage(_))
    }
}
