//! Graph node inspection

use std::collections::BTreeSet;
use std::path::PathBuf;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::links::{Frontmatter, extract_inline_references, resolve_wikilinks};
use crate::registry::Registry;

/// A graph node with its frontmatter and where its links lead
#[derive(Debug, Clone, Serialize)]
pub struct NodeDetails {
    pub id: String,
    pub path: PathBuf,
    pub frontmatter: Frontmatter,
    /// Inline links in order of first appearance, trimmed for display
    pub wikilinks: Vec<String>,
    /// References (inline or frontmatter) that name no known entity.
    ///
    /// Inline references are taken verbatim, as validation sees them, so
    /// `[[ index ]]` is unresolved even though it displays as `index`.
    pub unresolved: Vec<String>,
}

/// Node identifiers are limited to letters, digits, `-` and `_` so they can
/// never escape the graph directory.
pub fn validate_node_id(id: &str) -> Result<()> {
    if id.is_empty()
        || !id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(Error::InvalidInput(format!(
            "Graph node id '{}' may only contain letters, numbers, hyphens, and underscores",
            id
        )));
    }
    Ok(())
}

/// Load one graph node by identifier
pub fn show_node(registry: &Registry, id: &str) -> Result<NodeDetails> {
    validate_node_id(id)?;

    let graph_nodes = registry.list_graph_nodes()?;
    if !graph_nodes.contains(id) {
        return Err(Error::NodeNotFound(id.to_string()));
    }

    let text = registry.read_node(id)?;
    let frontmatter = Frontmatter::parse(&text);
    let wikilinks = resolve_wikilinks(&text);

    let skills = registry.list_skills()?;
    let inline = extract_inline_references(&text);
    let mut unresolved: Vec<String> = Vec::new();
    let mut seen = BTreeSet::new();
    for target in inline
        .iter()
        .chain(&frontmatter.skills)
        .chain(&frontmatter.links)
    {
        if !graph_nodes.contains(target) && !skills.contains(target) && seen.insert(target) {
            unresolved.push(target.clone());
        }
    }

    Ok(NodeDetails {
        id: id.to_string(),
        path: registry.node_path(id),
        frontmatter,
        wikilinks,
        unresolved,
    })
}

/// Format node details for display
pub fn format_node(details: &NodeDetails) -> String {
    let mut output = String::new();

    output.push_str(&format!("Graph node: {}\n", details.id));
    output.push_str(&format!("  Path: {}\n", details.path.display()));
    if let Some(id) = &details.frontmatter.id {
        if id != &details.id {
            output.push_str(&format!("  Frontmatter id: {}\n", id));
        }
    }
    if let Some(description) = &details.frontmatter.description {
        output.push_str(&format!("  Description: {}\n", description));
    }

    for (label, items) in [
        ("Skills", &details.frontmatter.skills),
        ("Links", &details.frontmatter.links),
        ("Wikilinks", &details.wikilinks),
    ] {
        if items.is_empty() {
            output.push_str(&format!("  {}: (none)\n", label));
        } else {
            output.push_str(&format!("  {}:\n", label));
            for item in items {
                output.push_str(&format!("    - {}\n", item));
            }
        }
    }

    if !details.unresolved.is_empty() {
        let quoted: Vec<String> = details
            .unresolved
            .iter()
            .map(|target| format!("'{}'", target))
            .collect();
        output.push_str(&format!("  Unresolved: {}\n", quoted.join(", ")));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RegistryConfig;
    use crate::validation::{IssueKind, Validator};
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Registry) {
        let dir = TempDir::new().unwrap();
        let graph = dir.path().join("graph");
        fs::create_dir_all(&graph).unwrap();
        fs::create_dir_all(dir.path().join("skills/aave-lending")).unwrap();
        fs::write(dir.path().join("skills/aave-lending/SKILL.md"), "# Aave").unwrap();
        fs::write(graph.join("index.md"), "[[defi]]").unwrap();
        fs::write(
            graph.join("defi.md"),
            "---\nid: defi\ndescription: DeFi hub\nskills: [aave-lending, compound]\n---\nSee [[ index ]] and [[defi]].\n",
        )
        .unwrap();
        let registry = Registry::new(RegistryConfig::at(dir.path()));
        (dir, registry)
    }

    #[test]
    fn test_show_node_details() {
        let (_dir, registry) = setup();
        let details = show_node(&registry, "defi").unwrap();

        assert_eq!(details.frontmatter.description.as_deref(), Some("DeFi hub"));
        assert_eq!(details.wikilinks, vec!["index", "defi"]);
        assert_eq!(details.unresolved, vec![" index ", "compound"]);

        let text = format_node(&details);
        assert!(text.contains("Graph node: defi"));
        assert!(text.contains("    - aave-lending"));
        assert!(text.contains("  Links: (none)"));
        assert!(text.contains("  Unresolved: ' index ', 'compound'"));
    }

    #[test]
    fn test_unresolved_matches_validation() {
        let (dir, registry) = setup();
        fs::write(
            dir.path().join("graph/index.md"),
            "[[defi]] [[ defi ]] [[aave-lending]]",
        )
        .unwrap();

        let details = show_node(&registry, "index").unwrap();
        assert_eq!(details.wikilinks, vec!["defi", "aave-lending"]);
        assert_eq!(details.unresolved, vec![" defi "]);

        let report = Validator::new(&registry).run().unwrap();
        let broken: Vec<&str> = report
            .errors
            .iter()
            .filter(|issue| issue.kind == IssueKind::BrokenReference)
            .map(|issue| issue.message.as_str())
            .collect();
        assert_eq!(broken.len(), 2);
        assert!(broken.iter().any(|m| m.ends_with("broken wikilink [[ defi ]]")));
        assert!(broken.iter().any(|m| m.ends_with("broken wikilink [[ index ]]")));
    }

    #[test]
    fn test_rejects_unsafe_ids() {
        let (_dir, registry) = setup();
        for id in ["../secrets", "a b", "", "index.md"] {
            let err = show_node(&registry, id).unwrap_err();
            assert_eq!(err.code(), "E800", "id {:?}", id);
        }
    }

    #[test]
    fn test_unknown_node() {
        let (_dir, registry) = setup();
        let err = show_node(&registry, "ghost").unwrap_err();
        assert!(matches!(err, Error::NodeNotFound(ref id) if id == "ghost"));
    }
}
