//! depviz - package dependency graph visualizer
//!
//! depviz resolves the transitive dependency graph of a package and emits
//! it as Graphviz DOT text for an external renderer. Dependencies are
//! discovered from a live package index over HTTP, or from a local fixture
//! directory when test mode is enabled, and expanded breadth-first up to a
//! configured depth.
//!
//! # Pipeline
//!
//! The tool is a strict linear pipeline; each stage is a pure function of
//! its input:
//!
//! ```text
//! configuration -> build_graph -> filter_graph -> to_dot -> text output
//! ```
//!
//! - [`config`] - YAML configuration loading and validation
//! - [`metadata`] - the `MetadataSource` capability with registry and
//!   fixture backends
//! - [`resolver`] - graph storage, the breadth-first builder, and the
//!   substring filter
//! - [`dot`] - deterministic DOT serialization
//! - [`cli`] - subcommands exposing the pipeline stages
//!
//! # Guarantees
//!
//! - The root package is always a node of the built graph, even with zero
//!   dependencies.
//! - Nodes are unique per normalized name; edges are unique per ordered
//!   pair; each package's metadata is fetched at most once.
//! - Traversal terminates on cyclic and self-referential dependency
//!   declarations.
//! - Serialization of the same graph is byte-identical across runs.
//! - A transitive dependency that fails lookup degrades to an unexpanded
//!   leaf instead of failing the run; only root lookup failures are fatal.
//!
//! # Example
//!
//! ```rust,no_run
//! use depviz_cli::metadata::FixtureSource;
//! use depviz_cli::package::PackageName;
//! use depviz_cli::resolver::{FilterOptions, build_graph, filter_graph};
//! use depviz_cli::dot::to_dot;
//!
//! # async fn example() -> Result<(), depviz_cli::core::DepvizError> {
//! let mut source = FixtureSource::new();
//! source.insert("app", &["lib-a", "lib-b"])?;
//! source.insert("lib-a", &[])?;
//! source.insert("lib-b", &[])?;
//!
//! let root = PackageName::new("app")?;
//! let graph = build_graph(root, 3, &source).await?;
//! let graph = filter_graph(&graph, Some("lib"), FilterOptions { keep_root: true });
//! println!("{}", to_dot(&graph)?);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod dot;
pub mod metadata;
pub mod package;
pub mod resolver;
