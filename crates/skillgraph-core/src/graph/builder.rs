//! Link graph construction

use std::collections::BTreeSet;

use tracing::debug;

use crate::links::{Frontmatter, extract_inline_references};
use crate::registry::{Document, DocumentSet, EntityKind};

use super::LinkGraph;

/// Build the traversal graph from a registry snapshot.
///
/// Graph nodes contribute inline links plus frontmatter `skills` and `links`;
/// skill descriptors contribute inline links only. Targets outside the set of
/// known identifiers are dropped here; reporting them is the job of
/// [`super::validate_references`]. Unreadable documents get no entry.
pub fn build_link_graph(documents: &DocumentSet) -> LinkGraph {
    let valid = documents.valid_targets();
    let mut graph = LinkGraph::new();

    for doc in documents.documents() {
        let targets: BTreeSet<String> = outgoing_references(doc)
            .into_iter()
            .filter(|target| valid.contains(target))
            .collect();
        graph.insert(doc.id.clone(), targets);
    }

    debug!(
        entities = graph.len(),
        edges = graph.edge_count(),
        "Built link graph"
    );
    graph
}

/// Every reference a document makes, resolved or not
pub fn outgoing_references(doc: &Document) -> BTreeSet<String> {
    let mut references = extract_inline_references(&doc.text);
    if doc.kind == EntityKind::GraphNode {
        references.extend(Frontmatter::parse(&doc.text).references());
    }
    references
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn node(id: &str, text: &str) -> Document {
        Document::new(id, EntityKind::GraphNode, format!("graph/{}.md", id), text)
    }

    fn skill(id: &str, text: &str) -> Document {
        Document::new(id, EntityKind::Skill, format!("skills/{}/SKILL.md", id), text)
    }

    #[test]
    fn test_unions_inline_and_frontmatter() {
        let mut docs = DocumentSet::default();
        docs.push(node("index", "---\nlinks: [defi]\n---\nSee [[payments]]"));
        docs.push(node("defi", "---\nskills: [aave]\n---\n"));
        docs.push(node("payments", ""));
        docs.push(skill("aave", ""));

        let graph = build_link_graph(&docs);
        assert_eq!(graph.targets("index"), Some(&set(&["defi", "payments"])));
        assert_eq!(graph.targets("defi"), Some(&set(&["aave"])));
        assert_eq!(graph.targets("payments"), Some(&BTreeSet::new()));
    }

    #[test]
    fn test_drops_unknown_targets() {
        let mut docs = DocumentSet::default();
        docs.push(node("index", "---\nskills: [missing-skill]\n---\n[[ghost]] [[alpha]]"));
        docs.push(node("alpha", ""));

        let graph = build_link_graph(&docs);
        assert_eq!(graph.targets("index"), Some(&set(&["alpha"])));
    }

    #[test]
    fn test_skill_frontmatter_is_not_an_edge() {
        let mut docs = DocumentSet::default();
        docs.push(node("index", ""));
        docs.push(node("alpha", ""));
        docs.push(skill("beta", "---\nlinks: [alpha]\n---\nUses [[index]]"));

        let graph = build_link_graph(&docs);
        assert_eq!(graph.targets("beta"), Some(&set(&["index"])));
    }

    #[test]
    fn test_entity_without_document_has_no_entry() {
        let mut docs = DocumentSet::default();
        docs.push(node("index", "[[beta]]"));
        docs.skills.insert("beta".to_string());

        let graph = build_link_graph(&docs);
        assert!(!graph.contains("beta"));
        assert_eq!(graph.targets("index"), Some(&set(&["beta"])));
    }
}
