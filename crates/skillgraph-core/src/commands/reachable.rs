//! Listing what the root node leads to

use serde::Serialize;

use crate::error::Result;
use crate::graph::{build_link_graph, find_reachable};
use crate::registry::{EntityKind, Registry};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReachableEntity {
    pub id: String,
    pub kind: EntityKind,
}

/// Every entity reachable from the root node, graph nodes first, each group
/// sorted by identifier
pub fn list_reachable(registry: &Registry) -> Result<Vec<ReachableEntity>> {
    let documents = registry.load()?;
    let graph = build_link_graph(&documents);
    let reachable = find_reachable(&graph, registry.root_node());

    let mut entities: Vec<ReachableEntity> = reachable
        .into_iter()
        .map(|id| {
            let kind = if documents.graph_nodes.contains(&id) {
                EntityKind::GraphNode
            } else {
                EntityKind::Skill
            };
            ReachableEntity { id, kind }
        })
        .collect();
    entities.sort_by_key(|e| e.kind != EntityKind::GraphNode);
    Ok(entities)
}

/// Format reachable entities for display
pub fn format_reachable(entities: &[ReachableEntity], root: &str) -> String {
    if entities.is_empty() {
        return format!("Nothing is reachable: {}.md is missing.\n", root);
    }

    let mut output = format!("Reachable from {} ({}):\n", root, entities.len());
    for entity in entities {
        let tag = match entity.kind {
            EntityKind::GraphNode => "node ",
            EntityKind::Skill => "skill",
        };
        output.push_str(&format!("  [{}] {}\n", tag, entity.id));
    }
    output
}
