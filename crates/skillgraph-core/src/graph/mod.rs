//! Link graph analysis
//!
//! - [`builder`]: compose per-document references into a [`LinkGraph`]
//! - [`reachability`]: breadth-first search from the root node
//! - [`integrity`]: broken references, unreachable skills, orphan nodes

pub mod builder;
pub mod integrity;
pub mod reachability;

pub use builder::build_link_graph;
pub use integrity::{find_orphan_nodes, find_unreachable_skills, validate_references};
pub use reachability::find_reachable;

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

/// Directed graph from entity identifier to its valid outgoing targets.
///
/// An entity with an entry but no targets is distinct from an entity with no
/// entry at all: reachability starts only from an entity that has an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LinkGraph {
    edges: BTreeMap<String, BTreeSet<String>>,
}

impl LinkGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the outgoing targets of `source`, replacing any previous entry
    pub fn insert(&mut self, source: impl Into<String>, targets: BTreeSet<String>) {
        self.edges.insert(source.into(), targets);
    }

    /// Add a single edge, creating the source entry if needed
    pub fn add_edge(&mut self, source: impl Into<String>, target: impl Into<String>) {
        self.edges
            .entry(source.into())
            .or_default()
            .insert(target.into());
    }

    pub fn contains(&self, id: &str) -> bool {
        self.edges.contains_key(id)
    }

    pub fn targets(&self, id: &str) -> Option<&BTreeSet<String>> {
        self.edges.get(id)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&String, &BTreeSet<String>)> {
        self.edges.iter()
    }

    /// Every source whose target set contains `target`
    pub fn sources_linking_to(&self, target: &str) -> BTreeSet<&str> {
        self.edges
            .iter()
            .filter(|(_, targets)| targets.contains(target))
            .map(|(source, _)| source.as_str())
            .collect()
    }

    pub fn indegree(&self, target: &str) -> usize {
        self.edges
            .values()
            .filter(|targets| targets.contains(target))
            .count()
    }

    /// Number of entities with an entry
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(BTreeSet::len).sum()
    }
}
