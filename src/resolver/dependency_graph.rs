//! Dependency graph storage for the resolved package graph.
//!
//! This module provides the graph data structure produced by the breadth-first
//! builder and consumed by the filter stage and the serializers. Nodes are
//! normalized package names; edges are ordered "dependent requires
//! dependency" pairs. Both are deduplicated on insertion, and both iterate in
//! insertion (first-discovered) order, which is what makes serialized output
//! byte-identical across runs on the same input.

use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{BTreeSet, HashMap};
use std::fmt::Write as _;

use crate::package::PackageName;

/// Directed graph of package dependencies.
///
/// The graph remembers which package the traversal started from (the root)
/// and which packages could not be expanded because their metadata lookup
/// failed (degraded leaves). It owns its node and edge collections
/// exclusively; the filter stage produces a new graph rather than mutating
/// one in place.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    /// The package the traversal started from.
    root: PackageName,
    /// The underlying directed graph.
    graph: DiGraph<PackageName, ()>,
    /// Map from package names to their graph indices.
    node_map: HashMap<PackageName, NodeIndex>,
    /// Packages whose own dependencies could not be resolved.
    unresolved: BTreeSet<PackageName>,
}

impl DependencyGraph {
    /// Create an empty graph rooted at `root`.
    ///
    /// The root node itself is not inserted; the builder adds it so that a
    /// filtered graph can legitimately omit it.
    pub fn new(root: PackageName) -> Self {
        Self {
            root,
            graph: DiGraph::new(),
            node_map: HashMap::new(),
            unresolved: BTreeSet::new(),
        }
    }

    /// The root package name (retained even if the node was filtered out).
    pub fn root(&self) -> &PackageName {
        &self.root
    }

    /// Add a node if it doesn't already exist, returning its index.
    fn ensure_node(&mut self, name: &PackageName) -> NodeIndex {
        if let Some(&index) = self.node_map.get(name) {
            index
        } else {
            let index = self.graph.add_node(name.clone());
            self.node_map.insert(name.clone(), index);
            index
        }
    }

    /// Add a node to the graph if it doesn't already exist.
    pub fn add_node(&mut self, name: &PackageName) {
        self.ensure_node(name);
    }

    /// Add a dependency edge: `from` requires `to`.
    ///
    /// Either endpoint is created if missing. The edge is skipped if the
    /// same ordered pair is already present.
    pub fn add_dependency(&mut self, from: &PackageName, to: &PackageName) {
        let from_idx = self.ensure_node(from);
        let to_idx = self.ensure_node(to);

        if !self.graph.contains_edge(from_idx, to_idx) {
            self.graph.add_edge(from_idx, to_idx, ());
        }
    }

    /// Whether `name` is a node in this graph.
    pub fn contains(&self, name: &PackageName) -> bool {
        self.node_map.contains_key(name)
    }

    /// Record that `name` could not be expanded (metadata lookup failed).
    pub fn mark_unresolved(&mut self, name: PackageName) {
        self.unresolved.insert(name);
    }

    /// Whether `name` is a degraded leaf.
    pub fn is_unresolved(&self, name: &PackageName) -> bool {
        self.unresolved.contains(name)
    }

    /// Degraded leaves, in sorted order.
    pub fn unresolved(&self) -> impl Iterator<Item = &PackageName> {
        self.unresolved.iter()
    }

    /// All nodes, in first-discovered order.
    pub fn nodes(&self) -> impl Iterator<Item = &PackageName> {
        self.graph.node_indices().map(|idx| &self.graph[idx])
    }

    /// All edges as (dependent, dependency) pairs, in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&PackageName, &PackageName)> {
        use petgraph::visit::EdgeRef;
        self.graph
            .edge_references()
            .map(|edge| (&self.graph[edge.source()], &self.graph[edge.target()]))
    }

    /// Direct dependencies of `name`, in the order their edges were added.
    pub fn direct_deps(&self, name: &PackageName) -> Vec<PackageName> {
        if let Some(&idx) = self.node_map.get(name) {
            // petgraph iterates neighbors most-recently-added first
            let mut deps: Vec<PackageName> =
                self.graph.neighbors(idx).map(|i| self.graph[i].clone()).collect();
            deps.reverse();
            deps
        } else {
            Vec::new()
        }
    }

    /// Check if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Total number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Total number of edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Render the graph as an ASCII tree rooted at the root package.
    ///
    /// A node already shown in full is marked `(*)` and not descended into
    /// again, which also keeps cycles from recursing forever. Degraded
    /// leaves carry an `(unresolved)` suffix. If the root node was filtered
    /// out the remaining nodes are listed flat.
    pub fn to_tree_string(&self) -> String {
        let mut result = String::new();

        if !self.contains(&self.root) {
            let _ = writeln!(result, "(root '{}' not in graph)", self.root);
            for node in self.nodes() {
                let _ = writeln!(result, "{}{}", node, self.unresolved_suffix(node));
            }
            return result;
        }

        let _ = writeln!(result, "{}{}", self.root, self.unresolved_suffix(&self.root));

        let mut displayed = BTreeSet::new();
        displayed.insert(self.root.clone());

        let deps = self.direct_deps(&self.root);
        for (i, dep) in deps.iter().enumerate() {
            let is_last = i == deps.len() - 1;
            self.build_tree_string(dep, &mut result, "", is_last, &mut displayed);
        }

        result
    }

    fn build_tree_string(
        &self,
        node: &PackageName,
        result: &mut String,
        prefix: &str,
        is_last: bool,
        displayed: &mut BTreeSet<PackageName>,
    ) {
        let connector = if is_last { "└── " } else { "├── " };
        let duplicate = !displayed.insert(node.clone());
        let marker = if duplicate { " (*)" } else { "" };
        let _ = writeln!(
            result,
            "{}{}{}{}{}",
            prefix,
            connector,
            node,
            self.unresolved_suffix(node),
            marker
        );

        if duplicate {
            return;
        }

        let deps = self.direct_deps(node);
        let child_prefix = if is_last {
            format!("{prefix}    ")
        } else {
            format!("{prefix}│   ")
        };

        for (i, dep) in deps.iter().enumerate() {
            let is_last_child = i == deps.len() - 1;
            self.build_tree_string(dep, result, &child_prefix, is_last_child, displayed);
        }
    }

    fn unresolved_suffix(&self, node: &PackageName) -> &'static str {
        if self.is_unresolved(node) { " (unresolved)" } else { "" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(raw: &str) -> PackageName {
        PackageName::new(raw).unwrap()
    }

    #[test]
    fn test_nodes_deduplicate_by_normalized_name() {
        let mut graph = DependencyGraph::new(name("app"));
        graph.add_node(&name("app"));
        graph.add_dependency(&name("app"), &name("Lib_A"));
        graph.add_dependency(&name("app"), &name("lib-a"));

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_duplicate_edges_collapse() {
        let mut graph = DependencyGraph::new(name("a"));
        graph.add_dependency(&name("a"), &name("b"));
        graph.add_dependency(&name("a"), &name("b"));

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.node_count(), 2);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut graph = DependencyGraph::new(name("app"));
        graph.add_node(&name("app"));
        graph.add_dependency(&name("app"), &name("zlib"));
        graph.add_dependency(&name("app"), &name("aiohttp"));
        graph.add_dependency(&name("zlib"), &name("aiohttp"));

        let nodes: Vec<&str> = graph.nodes().map(PackageName::as_str).collect();
        assert_eq!(nodes, vec!["app", "zlib", "aiohttp"]);

        let edges: Vec<(&str, &str)> =
            graph.edges().map(|(a, b)| (a.as_str(), b.as_str())).collect();
        assert_eq!(
            edges,
            vec![("app", "zlib"), ("app", "aiohttp"), ("zlib", "aiohttp")]
        );
    }

    #[test]
    fn test_direct_deps_in_added_order() {
        let mut graph = DependencyGraph::new(name("app"));
        graph.add_dependency(&name("app"), &name("first"));
        graph.add_dependency(&name("app"), &name("second"));
        graph.add_dependency(&name("app"), &name("third"));

        let deps: Vec<String> =
            graph.direct_deps(&name("app")).iter().map(ToString::to_string).collect();
        assert_eq!(deps, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_self_dependency_is_a_single_edge() {
        let mut graph = DependencyGraph::new(name("a"));
        graph.add_dependency(&name("a"), &name("a"));

        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_tree_string_terminates_on_cycles() {
        let mut graph = DependencyGraph::new(name("a"));
        graph.add_node(&name("a"));
        graph.add_dependency(&name("a"), &name("b"));
        graph.add_dependency(&name("b"), &name("a"));

        let tree = graph.to_tree_string();
        assert!(tree.contains("└── b"));
        assert!(tree.contains("(*)"));
    }

    #[test]
    fn test_tree_string_marks_unresolved() {
        let mut graph = DependencyGraph::new(name("x"));
        graph.add_node(&name("x"));
        graph.add_dependency(&name("x"), &name("y"));
        graph.mark_unresolved(name("y"));

        let tree = graph.to_tree_string();
        assert!(tree.contains("y (unresolved)"));
    }

    #[test]
    fn test_tree_string_with_filtered_root() {
        let mut graph = DependencyGraph::new(name("gone"));
        graph.add_node(&name("survivor"));

        let tree = graph.to_tree_string();
        assert!(tree.contains("not in graph"));
        assert!(tree.contains("survivor"));
    }

    #[test]
    fn test_empty_graph() {
        let graph = DependencyGraph::new(name("root"));
        assert!(graph.is_empty());
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
        assert!(!graph.contains(&name("root")));
    }
}
