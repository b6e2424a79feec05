//! Substring filtering of a built dependency graph.
//!
//! Filtering produces a new graph; the input is never mutated. A node
//! survives when its normalized name contains the pattern (the pattern is
//! lowercased first, so matching is effectively case-insensitive). Edges
//! survive only when both endpoints do.
//!
//! The root is not exempt by default: it is filtered like any other node.
//! [`FilterOptions::keep_root`] opts into exemption for callers that always
//! want the traversal origin visible.

use crate::package::PackageName;
use crate::resolver::DependencyGraph;

/// Policy knobs for [`filter_graph`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterOptions {
    /// Keep the root node even when its name does not match the pattern.
    pub keep_root: bool,
}

/// Filter `graph` down to nodes whose name contains `pattern`.
///
/// An absent or empty pattern is the identity: the returned graph is a
/// structural copy of the input. Node order, edge order, and unresolved
/// markings of surviving nodes are preserved, so filtering commutes with
/// serialization determinism and is idempotent.
pub fn filter_graph(
    graph: &DependencyGraph,
    pattern: Option<&str>,
    options: FilterOptions,
) -> DependencyGraph {
    let pattern = match pattern {
        None => return graph.clone(),
        Some(p) if p.is_empty() => return graph.clone(),
        Some(p) => p.to_lowercase(),
    };

    let keep = |name: &PackageName| {
        (options.keep_root && name == graph.root()) || name.as_str().contains(&pattern)
    };

    let mut filtered = DependencyGraph::new(graph.root().clone());
    for node in graph.nodes() {
        if keep(node) {
            filtered.add_node(node);
            if graph.is_unresolved(node) {
                filtered.mark_unresolved(node.clone());
            }
        }
    }
    for (from, to) in graph.edges() {
        if filtered.contains(from) && filtered.contains(to) {
            filtered.add_dependency(from, to);
        }
    }

    filtered
}
