//! Show the resolved configuration.
//!
//! First stage of the pipeline: load the configuration file (or defaults),
//! validate it, and print the resolved values as `key: value` lines.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::Path;

use crate::config::VizConfig;

/// Command to display the resolved configuration.
#[derive(Args, Debug)]
pub struct ConfigCommand {}

impl ConfigCommand {
    /// Execute the config command.
    pub async fn execute(self, config_path: Option<&Path>) -> Result<()> {
        let config = VizConfig::load_or_default(config_path).await?;
        config.validate()?;

        println!("{}", "Resolved configuration".bold());
        println!("package_name: {}", config.package_name);
        println!("repository_url: {}", config.repository_url);
        println!("test_repository_path: {}", config.test_repository_path);
        println!("test_mode: {}", config.test_mode);
        println!("max_depth: {}", config.max_depth);
        println!("filter_substring: {}", config.filter_substring);
        println!("keep_root: {}", config.keep_root);

        Ok(())
    }
}
