//! Findings reported by a validation run

use std::fmt;

use serde::Serialize;

/// Errors fail the run; warnings are reported only
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Warning => "WARNING",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// `[[target]]` names neither a graph node nor a skill
    BrokenReference,
    /// No graph node carries the root identifier
    MissingRoot,
    /// The graph directory holds no nodes; the run stops early
    NoGraphNodes,
    /// A non-root graph node nothing links to
    OrphanNode,
    /// A discovered file could not be read
    UnreadableFile,
    /// A skill with no path from the root
    UnreachableSkill,
}

impl IssueKind {
    pub fn severity(&self) -> Severity {
        match self {
            Self::UnreachableSkill => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

/// A single finding with its human-readable message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub kind: IssueKind,
    pub severity: Severity,
    pub message: String,
}

impl Issue {
    pub fn new(kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: kind.severity(),
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}
