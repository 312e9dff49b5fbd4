//! Skillgraph Core Library
//!
//! This crate provides the core functionality for Skillgraph, including:
//! - Registry loading (graph nodes and skill folders)
//! - Link extraction (wikilinks and YAML frontmatter)
//! - Link graph construction, reachability, and orphan detection
//! - Validation reports with errors and warnings
//! - Commands shared by the CLI (validate, show, reachable)

pub mod commands;
pub mod config;
pub mod error;
pub mod graph;
pub mod links;
pub mod registry;
pub mod validation;

pub use error::{Error, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, RegistryConfig};
    pub use crate::error::{Error, Result};
    pub use crate::graph::LinkGraph;
    pub use crate::registry::{DocumentSet, Registry};
    pub use crate::validation::{Issue, IssueKind, Severity, ValidationReport, Validator};
}
