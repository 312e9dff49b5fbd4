//! Reachability from the root node

use std::collections::{BTreeSet, VecDeque};

use super::LinkGraph;

/// Every identifier reachable from `root`, the root included.
///
/// Returns an empty set when `root` has no entry in the graph. The result is
/// the closure of the edge relation, so it does not depend on the order in
/// which targets are enqueued.
pub fn find_reachable(graph: &LinkGraph, root: &str) -> BTreeSet<String> {
    let mut reachable = BTreeSet::new();
    if !graph.contains(root) {
        return reachable;
    }

    let mut queue = VecDeque::from([root.to_string()]);
    while let Some(current) = queue.pop_front() {
        if reachable.contains(&current) {
            continue;
        }
        if let Some(targets) = graph.targets(&current) {
            queue.extend(
                targets
                    .iter()
                    .filter(|target| !reachable.contains(*target))
                    .cloned(),
            );
        }
        reachable.insert(current);
    }

    reachable
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn graph(edges: &[(&str, &str)]) -> LinkGraph {
        let mut graph = LinkGraph::new();
        for (source, target) in edges {
            graph.add_edge(*source, *target);
        }
        graph
    }

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_missing_root_is_empty() {
        let graph = graph(&[("alpha", "beta")]);
        assert!(find_reachable(&graph, "index").is_empty());
    }

    #[test]
    fn test_root_alone() {
        let mut graph = LinkGraph::new();
        graph.insert("index", BTreeSet::new());
        assert_eq!(find_reachable(&graph, "index"), set(&["index"]));
    }

    #[test]
    fn test_transitive_closure() {
        let graph = graph(&[
            ("index", "defi"),
            ("defi", "aave"),
            ("defi", "uniswap"),
            ("island", "index"),
        ]);
        assert_eq!(
            find_reachable(&graph, "index"),
            set(&["index", "defi", "aave", "uniswap"])
        );
    }

    #[test]
    fn test_cycles_terminate() {
        let graph = graph(&[("index", "a"), ("a", "b"), ("b", "index"), ("b", "b")]);
        assert_eq!(find_reachable(&graph, "index"), set(&["index", "a", "b"]));
    }

    #[test]
    fn test_targets_without_entries_are_reached() {
        // A skill whose descriptor could not be read has no entry but is
        // still a valid target.
        let graph = graph(&[("index", "beta")]);
        assert_eq!(find_reachable(&graph, "index"), set(&["index", "beta"]));
    }

    #[test]
    fn test_idempotent() {
        let graph = graph(&[("index", "a"), ("a", "b")]);
        assert_eq!(find_reachable(&graph, "index"), find_reachable(&graph, "index"));
    }

    proptest! {
        #[test]
        fn prop_insertion_order_does_not_change_result(
            edges in prop::collection::vec((0u8..8, 0u8..8), 0..40),
            seed in any::<u64>(),
        ) {
            let name = |n: u8| if n == 0 { "index".to_string() } else { format!("n{}", n) };

            let mut forward = LinkGraph::new();
            for (s, t) in &edges {
                forward.add_edge(name(*s), name(*t));
            }

            // Deterministic shuffle driven by the seed
            let mut shuffled = edges.clone();
            let mut state = seed | 1;
            for i in (1..shuffled.len()).rev() {
                state ^= state << 13;
                state ^= state >> 7;
                state ^= state << 17;
                let j = (state % (i as u64 + 1)) as usize;
                shuffled.swap(i, j);
            }
            let mut permuted = LinkGraph::new();
            for (s, t) in shuffled.iter().rev() {
                permuted.add_edge(name(*s), name(*t));
            }

            prop_assert_eq!(
                find_reachable(&forward, "index"),
                find_reachable(&permuted, "index")
            );
        }

        #[test]
        fn prop_reachable_is_closed_under_edges(
            edges in prop::collection::vec((0u8..8, 0u8..8), 0..40),
        ) {
            let name = |n: u8| if n == 0 { "index".to_string() } else { format!("n{}", n) };
            let mut graph = LinkGraph::new();
            for (s, t) in &edges {
                graph.add_edge(name(*s), name(*t));
            }

            let reachable = find_reachable(&graph, "index");
            for id in &reachable {
                if let Some(targets) = graph.targets(id) {
                    prop_assert!(targets.is_subset(&reachable));
                }
            }
        }
    }
}
