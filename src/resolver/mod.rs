//! Graph resolution: breadth-first expansion of a package's declared
//! dependencies.
//!
//! The builder walks outward from a root package, querying a
//! [`MetadataSource`](crate::metadata::MetadataSource) for each discovered
//! package's direct dependencies, up to a configured depth. An explicit
//! frontier queue plus a visited set keyed by normalized name gives the
//! guarantees the rest of the pipeline relies on:
//!
//! - every package is expanded at most once (one metadata lookup per name),
//! - the traversal terminates even on cyclic or self-referential
//!   dependency declarations,
//! - nodes and edges are recorded in discovery order, making downstream
//!   serialization deterministic.
//!
//! Failure handling is asymmetric on purpose: if the root itself cannot be
//! resolved there is nothing to visualize and the build fails, but a
//! transitive dependency that fails lookup is kept as an unexpanded leaf so
//! one broken package does not hide the rest of the graph.

pub mod dependency_graph;
pub mod filter;

pub use dependency_graph::DependencyGraph;
pub use filter::{FilterOptions, filter_graph};

use std::collections::{HashSet, VecDeque};

use crate::core::DepvizError;
use crate::metadata::MetadataSource;
use crate::package::PackageName;

/// Build the dependency graph reachable from `root` within `max_depth`
/// edge-hops.
///
/// The root sits at depth 0; `max_depth == 0` therefore yields a graph with
/// exactly the root node and no edges, without consulting the source at
/// all. A package first discovered at depth `max_depth` is recorded but not
/// expanded.
///
/// # Errors
///
/// Returns the source's error if the root lookup fails. Lookup failures
/// for any other package are absorbed: the package stays in the graph as an
/// unexpanded leaf and the build continues.
pub async fn build_graph<S: MetadataSource>(
    root: PackageName,
    max_depth: usize,
    source: &S,
) -> Result<DependencyGraph, DepvizError> {
    let mut graph = DependencyGraph::new(root.clone());
    graph.add_node(&root);

    let mut visited: HashSet<PackageName> = HashSet::new();
    visited.insert(root.clone());

    let mut frontier: VecDeque<(PackageName, usize)> = VecDeque::new();
    frontier.push_back((root, 0));

    while let Some((current, depth)) = frontier.pop_front() {
        if depth >= max_depth {
            continue;
        }

        let deps = match source.lookup(&current).await {
            Ok(deps) => deps,
            // depth 0 is only ever the root
            Err(err) if depth == 0 => return Err(err),
            Err(err) => {
                tracing::warn!(
                    package = %current,
                    error = %err,
                    "dependency lookup failed; keeping as unexpanded leaf"
                );
                graph.mark_unresolved(current);
                continue;
            }
        };

        tracing::debug!(package = %current, depth, dependencies = deps.len(), "expanded");

        for dep in deps {
            if visited.insert(dep.clone()) {
                frontier.push_back((dep.clone(), depth + 1));
            }
            graph.add_dependency(&current, &dep);
        }
    }

    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::FixtureSource;
    use std::cell::RefCell;
    use std::collections::HashMap;

    fn name(raw: &str) -> PackageName {
        PackageName::new(raw).unwrap()
    }

    /// Wrapper that counts lookups per package name.
    struct CountingSource {
        inner: FixtureSource,
        lookups: RefCell<HashMap<String, usize>>,
    }

    impl CountingSource {
        fn new(inner: FixtureSource) -> Self {
            Self { inner, lookups: RefCell::new(HashMap::new()) }
        }
    }

    impl MetadataSource for CountingSource {
        async fn lookup(&self, name: &PackageName) -> Result<Vec<PackageName>, DepvizError> {
            *self.lookups.borrow_mut().entry(name.to_string()).or_insert(0) += 1;
            self.inner.lookup(name).await
        }
    }

    #[tokio::test]
    async fn test_depth_zero_is_root_only() {
        // the source is never consulted, so it can even be empty
        let source = FixtureSource::new();
        let graph = build_graph(name("app"), 0, &source).await.unwrap();

        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.contains(&name("app")));
    }

    #[tokio::test]
    async fn test_depth_one_excludes_grandchildren() {
        let mut source = FixtureSource::new();
        source.insert("app", &["lib-a", "lib-b"]).unwrap();
        source.insert("lib-a", &["lib-c"]).unwrap();
        source.insert("lib-b", &[]).unwrap();

        let graph = build_graph(name("app"), 1, &source).await.unwrap();

        let nodes: Vec<&str> = graph.nodes().map(PackageName::as_str).collect();
        assert_eq!(nodes, vec!["app", "lib-a", "lib-b"]);

        let edges: Vec<(&str, &str)> =
            graph.edges().map(|(a, b)| (a.as_str(), b.as_str())).collect();
        assert_eq!(edges, vec![("app", "lib-a"), ("app", "lib-b")]);
    }

    #[tokio::test]
    async fn test_transitive_expansion() {
        let mut source = FixtureSource::new();
        source.insert("app", &["lib-a"]).unwrap();
        source.insert("lib-a", &["lib-b"]).unwrap();
        source.insert("lib-b", &[]).unwrap();

        let graph = build_graph(name("app"), 3, &source).await.unwrap();

        assert_eq!(graph.node_count(), 3);
        let edges: Vec<(&str, &str)> =
            graph.edges().map(|(a, b)| (a.as_str(), b.as_str())).collect();
        assert_eq!(edges, vec![("app", "lib-a"), ("lib-a", "lib-b")]);
    }

    #[tokio::test]
    async fn test_cycle_terminates_with_both_edges() {
        let mut source = FixtureSource::new();
        source.insert("a", &["b"]).unwrap();
        source.insert("b", &["a"]).unwrap();

        let graph = build_graph(name("a"), 5, &source).await.unwrap();

        assert_eq!(graph.node_count(), 2);
        let edges: Vec<(&str, &str)> =
            graph.edges().map(|(a, b)| (a.as_str(), b.as_str())).collect();
        assert_eq!(edges, vec![("a", "b"), ("b", "a")]);
    }

    #[tokio::test]
    async fn test_self_dependency_records_edge_once() {
        let mut source = FixtureSource::new();
        source.insert("a", &["a"]).unwrap();

        let graph = build_graph(name("a"), 3, &source).await.unwrap();

        assert_eq!(graph.node_count(), 1);
        let edges: Vec<(&str, &str)> =
            graph.edges().map(|(a, b)| (a.as_str(), b.as_str())).collect();
        assert_eq!(edges, vec![("a", "a")]);
    }

    #[tokio::test]
    async fn test_root_lookup_failure_is_fatal() {
        let source = FixtureSource::new();
        let err = build_graph(name("ghost"), 2, &source).await.unwrap_err();
        assert!(matches!(err, DepvizError::PackageNotFound { .. }));
    }

    #[tokio::test]
    async fn test_dependency_lookup_failure_degrades_to_leaf() {
        let mut source = FixtureSource::new();
        source.insert("x", &["y", "z"]).unwrap();
        source.insert("z", &[]).unwrap();
        // no entry for y

        let graph = build_graph(name("x"), 3, &source).await.unwrap();

        let nodes: Vec<&str> = graph.nodes().map(PackageName::as_str).collect();
        assert_eq!(nodes, vec!["x", "y", "z"]);

        let edges: Vec<(&str, &str)> =
            graph.edges().map(|(a, b)| (a.as_str(), b.as_str())).collect();
        assert_eq!(edges, vec![("x", "y"), ("x", "z")]);

        assert!(graph.is_unresolved(&name("y")));
        assert!(!graph.is_unresolved(&name("z")));
    }

    #[tokio::test]
    async fn test_diamond_expands_shared_dependency_once() {
        let mut source = FixtureSource::new();
        source.insert("app", &["left", "right"]).unwrap();
        source.insert("left", &["shared"]).unwrap();
        source.insert("right", &["shared"]).unwrap();
        source.insert("shared", &[]).unwrap();
        let source = CountingSource::new(source);

        let graph = build_graph(name("app"), 4, &source).await.unwrap();

        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 4);
        for (package, count) in source.lookups.borrow().iter() {
            assert_eq!(*count, 1, "package '{package}' looked up more than once");
        }
    }

    #[tokio::test]
    async fn test_node_at_max_depth_is_not_expanded() {
        let mut source = FixtureSource::new();
        source.insert("app", &["mid"]).unwrap();
        source.insert("mid", &["deep"]).unwrap();
        let source = CountingSource::new(source);

        let graph = build_graph(name("app"), 2, &source).await.unwrap();

        // "deep" is discovered at depth 2 but never looked up
        assert!(graph.contains(&name("deep")));
        assert!(!source.lookups.borrow().contains_key("deep"));
    }

    #[tokio::test]
    async fn test_duplicate_declarations_collapse() {
        let mut source = FixtureSource::new();
        source.insert("app", &["lib-a", "Lib_A"]).unwrap();
        source.insert("lib-a", &[]).unwrap();

        let graph = build_graph(name("app"), 2, &source).await.unwrap();

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
    }
}
