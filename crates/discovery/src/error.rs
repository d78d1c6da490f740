use litegen_go_syntax::SyntaxError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DiscoveryError>;

#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("Failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// Any failure while reading or parsing a unit of one source area
    #[error("parse {area} failed: {source}")]
    Parse {
        area: String,
        #[source]
        source: SyntaxError,
    },

    #[error("Analysis task failed: {0}")]
    Task(String),
}

impl DiscoveryError {
    pub fn parse(area: impl Into<String>, source: SyntaxError) -> Self {
        Self::Parse {
            area: area.into(),
            source,
        }
    }

    /// True when the source tree itself is malformed (as opposed to I/O trouble)
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::Parse { source, .. } if source.is_parse_error())
    }
}

/// Failures resolving the module identity from `go.mod`
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("go.mod not found in {}", .0.display())]
    Missing(PathBuf),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid go.mod format: no module directive in {}", .0.display())]
    Malformed(PathBuf),
}
