//! Command-line interface for depviz.
//!
//! The surrounding tool runs as a staged pipeline, and the subcommands map
//! onto those stages:
//!
//! - [`init`] - scaffold a configuration file and a fixture repository
//! - [`config`] - load, validate, and print the resolved configuration
//! - [`deps`] - fetch and list the root package's direct dependencies
//! - [`graph`] - build the full graph, filter it, and serialize it
//!
//! Global flags select the configuration file and the output verbosity;
//! everything stage-specific lives on the individual commands.

pub mod config;
pub mod deps;
pub mod graph;
pub mod init;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Main CLI structure for depviz.
#[derive(Parser)]
#[command(
    name = "depviz",
    about = "Resolve and visualize the dependency graph of a package",
    version,
    long_about = "depviz discovers a package's declared dependencies from a package index \
                  (or a local fixture set), expands them up to a configurable depth, and \
                  emits the graph as Graphviz DOT text."
)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output for debugging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Path to the configuration file (default: ./depviz.yaml, then the
    /// user configuration directory).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,
}

/// Available subcommands for the depviz CLI.
#[derive(Subcommand)]
enum Commands {
    /// Create a starter configuration file and fixture repository.
    Init(init::InitCommand),

    /// Show the resolved configuration.
    Config(config::ConfigCommand),

    /// List the direct dependencies of the root package.
    Deps(deps::DepsCommand),

    /// Build, filter, and serialize the full dependency graph.
    Graph(graph::GraphCommand),
}

impl Cli {
    /// Execute the parsed command.
    pub async fn execute(self) -> Result<()> {
        init_logging(self.verbose, self.quiet);
        if self.no_color {
            colored::control::set_override(false);
        }

        let config_path = self.config;
        match self.command {
            Commands::Init(cmd) => cmd.execute().await,
            Commands::Config(cmd) => cmd.execute(config_path.as_deref()).await,
            Commands::Deps(cmd) => cmd.execute(config_path.as_deref()).await,
            Commands::Graph(cmd) => cmd.execute(config_path.as_deref()).await,
        }
    }
}

/// Install the tracing subscriber once, honoring `RUST_LOG` when set.
fn init_logging(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
