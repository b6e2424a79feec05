//! List the direct dependencies of the root package.
//!
//! Second stage of the pipeline: one metadata lookup for the root, printed
//! as a numbered list. A failed lookup here is always fatal; this stage
//! has no graph to degrade into. The configured substring filter is applied
//! to the listing when set.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::Path;

use crate::config::VizConfig;
use crate::metadata::{FixtureSource, MetadataSource, RegistrySource};
use crate::package::PackageName;

/// Command to list direct dependencies.
#[derive(Args, Debug)]
pub struct DepsCommand {
    /// Package to inspect (defaults to package_name from the configuration)
    package: Option<String>,
}

impl DepsCommand {
    /// Execute the deps command.
    pub async fn execute(self, config_path: Option<&Path>) -> Result<()> {
        let mut config = VizConfig::load_or_default(config_path).await?;
        if let Some(ref package) = self.package {
            config.package_name = package.clone();
        }
        config.validate()?;

        let root = PackageName::new(&config.package_name)?;

        let mut deps = if config.test_mode {
            let source = FixtureSource::from_dir(Path::new(&config.test_repository_path))?;
            source.lookup(&root).await?
        } else {
            let source = RegistrySource::new(&config.repository_url)?;
            source.lookup(&root).await?
        };

        if !config.filter_substring.is_empty() {
            let pattern = config.filter_substring.to_lowercase();
            deps.retain(|dep| dep.as_str().contains(&pattern));
        }

        println!("{}", format!("Direct dependencies of {root}").bold());
        if deps.is_empty() {
            println!("No direct dependencies found.");
            return Ok(());
        }
        for (i, dep) in deps.iter().enumerate() {
            println!("{:2}. {}", i + 1, dep);
        }
        println!("Total: {}", deps.len());

        Ok(())
    }
}
