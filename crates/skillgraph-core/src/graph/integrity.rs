//! Broken references, unreachable skills, and orphan nodes

use std::collections::BTreeSet;

use crate::links::extract_inline_references;
use crate::registry::Document;
use crate::validation::{Issue, IssueKind};

use super::LinkGraph;

/// One [`IssueKind::BrokenReference`] per inline link whose target is not in
/// `valid_targets`.
///
/// Only inline links are checked; frontmatter entries that do not resolve
/// are dropped from the graph without being reported.
pub fn validate_references<'a>(
    valid_targets: &BTreeSet<String>,
    documents: impl IntoIterator<Item = &'a Document>,
) -> Vec<Issue> {
    let mut issues = Vec::new();
    for doc in documents {
        for link in extract_inline_references(&doc.text) {
            if !valid_targets.contains(&link) {
                issues.push(Issue::new(
                    IssueKind::BrokenReference,
                    format!("{}: broken wikilink [[{}]]", doc.path.display(), link),
                ));
            }
        }
    }
    issues
}

/// Skills with no path from the root
pub fn find_unreachable_skills(
    skills: &BTreeSet<String>,
    reachable: &BTreeSet<String>,
) -> BTreeSet<String> {
    skills.difference(reachable).cloned().collect()
}

/// Graph nodes other than `root` that no link-graph entry points at.
///
/// Every entry counts as a source, skills and self-links included.
pub fn find_orphan_nodes(
    graph_nodes: &BTreeSet<String>,
    graph: &LinkGraph,
    root: &str,
) -> Vec<Issue> {
    graph_nodes
        .iter()
        .filter(|id| id.as_str() != root)
        .filter(|id| graph.indegree(id) == 0)
        .map(|id| {
            Issue::new(
                IssueKind::OrphanNode,
                format!(
                    "Orphan graph node '{}' is not linked from any other node",
                    id
                ),
            )
        })
        .collect()
}
