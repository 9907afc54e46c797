//! Errors raised while parsing and loading binding files.

use std::path::PathBuf;

use rabt_container::RabtError;

#[derive(Debug, thiserror::Error)]
pub enum DslError {
    /// A binding line lacks `->` or the terminating `;`.
    #[error("Pattern '{pattern}' not found in line '{line}'")]
    PatternNotFound { pattern: &'static str, line: String },

    #[error("File not found")]
    FileNotFound { path: PathBuf },

    #[error("Failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The container rejected a parsed binding.
    #[error(transparent)]
    Container(#[from] RabtError),

    #[error("line {number}: {source}")]
    AtLine {
        /// 1-based line number.
        number: usize,
        #[source]
        source: Box<DslError>,
    },
}

impl DslError {
    /// The error without line-number wrapping.
    pub fn innermost(&self) -> &DslError {
        match self {
            DslError::AtLine { source, .. } => source.innermost(),
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, DslError>;
