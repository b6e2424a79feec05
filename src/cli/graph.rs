//! Build, filter, and serialize the dependency graph.
//!
//! Stages three to five of the pipeline in one command: breadth-first graph
//! construction from the configured (or overridden) root, substring
//! filtering, and serialization to DOT, an ASCII tree, or JSON. The DOT
//! text is what the external renderer consumes; the other formats exist for
//! quick terminal inspection and scripting.

use anyhow::{Context, Result, anyhow};
use clap::Args;
use colored::Colorize;
use std::path::{Path, PathBuf};

use crate::config::VizConfig;
use crate::dot::to_dot;
use crate::metadata::{FixtureSource, RegistrySource};
use crate::package::PackageName;
use crate::resolver::{DependencyGraph, FilterOptions, build_graph, filter_graph};

/// Command to produce the dependency graph.
#[derive(Args, Debug)]
pub struct GraphCommand {
    /// Package to start from (defaults to package_name from the
    /// configuration)
    package: Option<String>,

    /// Maximum expansion depth, overriding the configuration
    #[arg(short = 'd', long)]
    depth: Option<usize>,

    /// Substring filter, overriding the configuration
    #[arg(short = 'F', long)]
    filter: Option<String>,

    /// Keep the root node even if it does not match the filter
    #[arg(long)]
    keep_root: bool,

    /// Output format (dot, tree, json)
    #[arg(short = 'f', long, default_value = "dot")]
    format: String,

    /// Write the output to a file instead of stdout
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,
}

impl GraphCommand {
    /// Execute the graph command.
    pub async fn execute(self, config_path: Option<&Path>) -> Result<()> {
        self.validate_arguments()?;

        let mut config = VizConfig::load_or_default(config_path).await?;
        if let Some(ref package) = self.package {
            config.package_name = package.clone();
        }
        if let Some(depth) = self.depth {
            config.max_depth = depth;
        }
        if let Some(ref filter) = self.filter {
            config.filter_substring = filter.clone();
        }
        if self.keep_root {
            config.keep_root = true;
        }
        config.validate()?;

        let root = PackageName::new(&config.package_name)?;

        let graph = if config.test_mode {
            let source = FixtureSource::from_dir(Path::new(&config.test_repository_path))?;
            build_graph(root, config.max_depth, &source).await?
        } else {
            let source = RegistrySource::new(&config.repository_url)?;
            build_graph(root, config.max_depth, &source).await?
        };

        let pattern =
            (!config.filter_substring.is_empty()).then_some(config.filter_substring.as_str());
        let filtered =
            filter_graph(&graph, pattern, FilterOptions { keep_root: config.keep_root });

        report_unresolved(&filtered);

        let text = match self.format.as_str() {
            "tree" => filtered.to_tree_string(),
            "json" => render_json(&filtered)?,
            _ => to_dot(&filtered)?,
        };

        match self.output {
            Some(ref path) => {
                tokio::fs::write(path, &text)
                    .await
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                println!(
                    "{} graph with {} node(s) and {} edge(s) written to {}",
                    "Done:".green().bold(),
                    filtered.node_count(),
                    filtered.edge_count(),
                    path.display()
                );
            }
            None => print!("{text}"),
        }

        Ok(())
    }

    fn validate_arguments(&self) -> Result<()> {
        match self.format.as_str() {
            "dot" | "tree" | "json" => Ok(()),
            other => Err(anyhow!("Invalid format '{other}'. Valid formats are: dot, tree, json")),
        }
    }
}

/// Point out nodes that were kept but never expanded, without failing the
/// run.
fn report_unresolved(graph: &DependencyGraph) {
    let unresolved: Vec<String> = graph.unresolved().map(ToString::to_string).collect();
    if unresolved.is_empty() {
        return;
    }
    eprintln!(
        "{} {} package(s) could not be expanded: {}",
        "Warning:".yellow().bold(),
        unresolved.len(),
        unresolved.join(", ")
    );
}

fn render_json(graph: &DependencyGraph) -> Result<String> {
    let json = serde_json::json!({
        "root": graph.root().as_str(),
        "nodes": graph
            .nodes()
            .map(|node| {
                serde_json::json!({
                    "name": node.as_str(),
                    "unresolved": graph.is_unresolved(node),
                })
            })
            .collect::<Vec<_>>(),
        "edges": graph
            .edges()
            .map(|(from, to)| {
                serde_json::json!({ "from": from.as_str(), "to": to.as_str() })
            })
            .collect::<Vec<_>>(),
    });
    Ok(format!("{}\n", serde_json::to_string_pretty(&json)?))
}
