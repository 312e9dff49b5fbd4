//! Error types for Skillgraph
//!
//! These are operational failures. Problems found *in* the registry
//! (broken links, orphans) are reported as [`crate::validation::Issue`]s.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using Skillgraph's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Skillgraph error types with helpful messages and suggestions
#[derive(Error, Debug)]
pub enum Error {
    // Registry errors (E001-E099)
    #[error("Graph node '{0}' not found. Run `skillgraph reachable` to see linked nodes.")]
    NodeNotFound(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Input errors (E800-E899)
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Wrap an I/O error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Get error code for this error type
    pub fn code(&self) -> &'static str {
        match self {
            Self::NodeNotFound(_) => "E001",
            Self::Io { .. } => "E002",
            Self::InvalidInput(_) => "E800",
        }
    }

    /// Get suggestion for how to fix this error
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::NodeNotFound(_) => Some("skillgraph reachable".to_string()),
            Self::Io { path, .. } => Some(format!("Check permissions on {}", path.display())),
            _ => None,
        }
    }
}
