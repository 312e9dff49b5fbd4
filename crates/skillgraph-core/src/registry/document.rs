//! In-memory registry snapshot

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// Which entity source a document came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    GraphNode,
    Skill,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GraphNode => "graph_node",
            Self::Skill => "skill",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A graph node file or a skill descriptor, read once
#[derive(Debug, Clone)]
pub struct Document {
    pub id: String,
    pub kind: EntityKind,
    pub path: PathBuf,
    pub text: String,
}

impl Document {
    pub fn new(
        id: impl Into<String>,
        kind: EntityKind,
        path: impl Into<PathBuf>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            path: path.into(),
            text: text.into(),
        }
    }
}

/// An entity whose file was discovered but could not be read
#[derive(Debug, Clone)]
pub struct UnreadableFile {
    pub id: String,
    pub kind: EntityKind,
    pub path: PathBuf,
    pub reason: String,
}

/// Every entity in the registry plus the text of each readable file
#[derive(Debug, Clone, Default)]
pub struct DocumentSet {
    pub graph_nodes: BTreeSet<String>,
    pub skills: BTreeSet<String>,
    /// Graph node documents keyed by identifier
    pub nodes: BTreeMap<String, Document>,
    /// Skill descriptor documents keyed by identifier
    pub descriptors: BTreeMap<String, Document>,
    pub unreadable: Vec<UnreadableFile>,
}

impl DocumentSet {
    /// Identifiers a reference may point at: graph nodes and skills
    pub fn valid_targets(&self) -> BTreeSet<String> {
        self.graph_nodes.union(&self.skills).cloned().collect()
    }

    pub fn node(&self, id: &str) -> Option<&Document> {
        self.nodes.get(id)
    }

    pub fn descriptor(&self, id: &str) -> Option<&Document> {
        self.descriptors.get(id)
    }

    /// Graph node documents, then skill descriptors, each in identifier order
    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        self.nodes.values().chain(self.descriptors.values())
    }

    pub fn push(&mut self, doc: Document) {
        match doc.kind {
            EntityKind::GraphNode => {
                self.graph_nodes.insert(doc.id.clone());
                self.nodes.insert(doc.id.clone(), doc);
            }
            EntityKind::Skill => {
                self.skills.insert(doc.id.clone());
                self.descriptors.insert(doc.id.clone(), doc);
            }
        }
    }
}
