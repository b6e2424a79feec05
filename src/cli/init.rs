//! Scaffold a new depviz working directory.
//!
//! Writes a starter `depviz.yaml` plus a small fixture repository so that
//! `depviz graph` produces output immediately, offline. The generated
//! configuration therefore starts in test mode; switching `test_mode` off
//! points the tool at the live index instead.

use anyhow::{Result, bail};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

/// Command to create a starter configuration and fixture set.
#[derive(Args, Debug)]
pub struct InitCommand {
    /// Directory to initialize (defaults to the current directory)
    #[arg(long)]
    path: Option<PathBuf>,

    /// Overwrite an existing configuration file
    #[arg(long)]
    force: bool,
}

const SAMPLE_CONFIG: &str = "\
package_name: app
repository_url: https://pypi.org/simple/
test_repository_path: ./fixtures
test_mode: true
max_depth: 3
filter_substring: \"\"
keep_root: false
";

const SAMPLE_FIXTURES: &[(&str, &str)] = &[
    ("app.yaml", "dependencies:\n  - lib-a\n  - lib-b\n"),
    ("lib-a.yaml", "dependencies:\n  - lib-c\n"),
    ("lib-b.yaml", "dependencies: []\n"),
    ("lib-c.yaml", "dependencies: []\n"),
];

impl InitCommand {
    /// Execute the init command.
    pub async fn execute(self) -> Result<()> {
        let dir = self.path.unwrap_or_else(|| PathBuf::from("."));
        tokio::fs::create_dir_all(&dir).await?;

        let config_path = dir.join("depviz.yaml");
        if config_path.exists() && !self.force {
            bail!("{} already exists (use --force to overwrite)", config_path.display());
        }
        tokio::fs::write(&config_path, SAMPLE_CONFIG).await?;

        let fixtures_dir = dir.join("fixtures");
        tokio::fs::create_dir_all(&fixtures_dir).await?;
        for (file, content) in SAMPLE_FIXTURES {
            tokio::fs::write(fixtures_dir.join(file), content).await?;
        }

        println!(
            "{} wrote {} and {} fixture package(s) under {}",
            "Done:".green().bold(),
            config_path.display(),
            SAMPLE_FIXTURES.len(),
            fixtures_dir.display()
        );
        println!("Next: depviz -c {} graph", config_path.display());

        Ok(())
    }
}
